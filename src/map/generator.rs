//! Procedural maze generation.
//!
//! Carves a connected region out of a solid wall grid, then seats the
//! start, goals, and warps on carved tiles. Every map produced here
//! satisfies the same structural invariants the decoder enforces.

use std::collections::HashMap;

use glam::UVec2;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::constants::{TileKind, MAX_GENERATION_ATTEMPTS, MIN_MAP_AREA};
use crate::error::GenerateError;
use crate::map::{flood_distances, index_for, neighbors, Map};
use crate::rng::MazeRng;

/// Procedural map generator.
pub struct MazeGenerator;

impl MazeGenerator {
    /// Generates a new random map with the requested number of warps.
    ///
    /// The area must hold at least a start and a required goal, plus one
    /// tile of slack per requested warp. Carving attempts that cannot
    /// seat all pieces are retried internally with fresh randomness;
    /// only an exhausted retry budget surfaces as an error.
    ///
    /// Generation is fully driven by `rng`: the same dimensions, warp
    /// count, and seed reproduce the same map.
    pub fn generate(
        width: u8,
        height: u8,
        warp_count: u8,
        rng: &mut MazeRng,
    ) -> Result<Map, GenerateError> {
        let area = width as usize * height as usize;
        let required = MIN_MAP_AREA + warp_count as usize;
        if area < required {
            return Err(GenerateError::MapTooSmallForRequest { area, required });
        }

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            if let Some(map) = Self::attempt(width, height, warp_count, rng) {
                debug!(width, height, warp_count, attempt, seed = rng.seed(), "generated map");
                return Ok(map);
            }
            trace!(attempt, "carving attempt discarded");
        }
        Err(GenerateError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// One full carving attempt; `None` means the attempt could not seat
    /// every piece and the caller should retry.
    fn attempt(width: u8, height: u8, warp_count: u8, rng: &mut MazeRng) -> Option<Map> {
        let needed = MIN_MAP_AREA + warp_count as usize;
        let (mut tiles, seed) = Self::carve(width, height, needed, rng);

        let carved = tiles.iter().filter(|&&kind| kind == TileKind::Path).count();
        if carved < needed {
            return None;
        }

        tiles[index_for(seed.x as u8, seed.y as u8, width)] = TileKind::Start;

        // Required goal: a farthest carved tile, ties broken randomly.
        let distances = flood_distances(&tiles, width, height, seed);
        let farthest = distances.iter().flatten().copied().max()?;
        if farthest == 0 {
            return None;
        }
        let candidates: Vec<usize> = (0..tiles.len())
            .filter(|&index| distances[index] == Some(farthest) && tiles[index] == TileKind::Path)
            .collect();
        let goal = *candidates.choose(rng)?;
        tiles[goal] = TileKind::RequiredGoal;

        let mut open: Vec<usize> = (0..tiles.len())
            .filter(|&index| tiles[index] == TileKind::Path)
            .collect();

        // A few optional goals on spare tiles, never eating into the
        // tiles the warps and their destinations still need.
        let reserved = warp_count as usize + usize::from(warp_count > 0);
        if open.len() > reserved {
            let limit = (open.len() - reserved).min(2);
            for _ in 0..rng.random_range(0..=limit) {
                let pick = rng.random_range(0..open.len());
                tiles[open.swap_remove(pick)] = TileKind::OptionalGoal;
            }
        }

        // Warp sources first, destinations second, so a destination is
        // never a tile that is about to become a warp source.
        let mut sources = Vec::with_capacity(warp_count as usize);
        for _ in 0..warp_count {
            let pick = rng.random_range(0..open.len());
            sources.push(open.swap_remove(pick));
        }
        for &source in &sources {
            tiles[source] = TileKind::Warp;
        }
        let mut warps = HashMap::with_capacity(sources.len());
        for &source in &sources {
            let target = if open.is_empty() {
                // Nothing is left open at the minimum legal area; any
                // carved tile other than the source is an acceptable
                // target, the format tolerates degenerate warps.
                let fallback: Vec<usize> = (0..tiles.len())
                    .filter(|&index| tiles[index] != TileKind::Wall && index != source)
                    .collect();
                *fallback.choose(rng)?
            } else {
                *open.choose(rng)?
            };
            warps.insert(source, target);
        }

        let map = Map::from_parts(width, height, tiles, seed, warps);
        if map.validate().is_err() || !map.required_goal_reachable() {
            return None;
        }
        Some(map)
    }

    /// Carves a connected open region into an all-wall grid by randomized
    /// frontier growth from a random seed tile.
    ///
    /// A frontier tile is carved only while it has exactly one open
    /// 4-neighbor, which keeps corridors a single tile wide and rules
    /// out diagonal leaks. Growth stops at the target fill or when the
    /// frontier runs dry.
    fn carve(width: u8, height: u8, needed: usize, rng: &mut MazeRng) -> (Vec<TileKind>, UVec2) {
        let area = width as usize * height as usize;
        let mut tiles = vec![TileKind::Wall; area];

        let seed = UVec2::new(
            rng.random_range(0..width as u32),
            rng.random_range(0..height as u32),
        );
        tiles[index_for(seed.x as u8, seed.y as u8, width)] = TileKind::Path;

        let target = (area * 45 / 100).max(needed + 1).min(area);
        let mut carved = 1;
        let mut frontier: Vec<UVec2> = neighbors(seed, width, height).into_iter().collect();
        while carved < target && !frontier.is_empty() {
            let pick = rng.random_range(0..frontier.len());
            let candidate = frontier.swap_remove(pick);
            let index = index_for(candidate.x as u8, candidate.y as u8, width);
            if tiles[index] != TileKind::Wall {
                continue;
            }
            let open_neighbors = neighbors(candidate, width, height)
                .iter()
                .filter(|next| tiles[index_for(next.x as u8, next.y as u8, width)] != TileKind::Wall)
                .count();
            if open_neighbors != 1 {
                continue;
            }
            tiles[index] = TileKind::Path;
            carved += 1;
            for next in neighbors(candidate, width, height) {
                if tiles[index_for(next.x as u8, next.y as u8, width)] == TileKind::Wall {
                    frontier.push(next);
                }
            }
        }

        (tiles, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carve_connects_everything_it_opens() {
        let mut rng = MazeRng::new(7);
        let (tiles, seed) = MazeGenerator::carve(9, 9, 2, &mut rng);
        let distances = flood_distances(&tiles, 9, 9, seed);
        for (index, &kind) in tiles.iter().enumerate() {
            if kind == TileKind::Path {
                assert!(distances[index].is_some(), "carved tile {index} unreachable");
            }
        }
    }

    #[test]
    fn test_generate_tiny_map() {
        let mut rng = MazeRng::new(3);
        let map = MazeGenerator::generate(2, 1, 0, &mut rng).unwrap();
        assert!(map.validate().is_ok());
        assert!(map.required_goal_reachable());
    }

    #[test]
    fn test_generate_rejects_undersized_request() {
        let mut rng = MazeRng::new(3);
        assert!(matches!(
            MazeGenerator::generate(2, 1, 1, &mut rng),
            Err(GenerateError::MapTooSmallForRequest { area: 2, required: 3 })
        ));
    }
}
