//! This module defines the map entity and provides functions for
//! decoding, encoding, generating, and rendering it.

pub mod decoder;
pub mod encoder;
pub mod generator;
pub mod render;
pub mod wire;

use std::collections::{HashMap, VecDeque};
use std::fmt;

use glam::{IVec2, UVec2};
use smallvec::SmallVec;

use crate::constants::{TileKind, MAX_ITEMS};
use crate::error::ValidationError;
use crate::map::render::MapRenderer;

/// Converts a coordinate pair to its row-major tile index.
///
/// Callers are responsible for bounds-checking `x` and `y` first; no
/// operation here can fail under in-bounds inputs.
pub fn index_for(x: u8, y: u8, width: u8) -> usize {
    y as usize * width as usize + x as usize
}

/// Converts a row-major tile index back to its coordinate pair.
pub fn coords_for(index: usize, width: u8) -> UVec2 {
    UVec2::new((index % width as usize) as u32, (index / width as usize) as u32)
}

/// 4-connected neighbor offsets.
const CARDINALS: [IVec2; 4] = [IVec2::NEG_Y, IVec2::Y, IVec2::NEG_X, IVec2::X];

/// Returns the in-bounds 4-connected neighbors of a position.
///
/// Adjacency is computed in coordinate space with explicit bounds checks;
/// raw index arithmetic would wrap across grid edges.
pub(crate) fn neighbors(position: UVec2, width: u8, height: u8) -> SmallVec<[UVec2; 4]> {
    let mut found = SmallVec::new();
    for offset in CARDINALS {
        let next = position.as_ivec2() + offset;
        if next.x >= 0 && next.x < width as i32 && next.y >= 0 && next.y < height as i32 {
            found.push(next.as_uvec2());
        }
    }
    found
}

/// Breadth-first distances from `origin` across non-wall tiles.
///
/// Unreached tiles (and walls) stay `None`.
pub(crate) fn flood_distances(
    tiles: &[TileKind],
    width: u8,
    height: u8,
    origin: UVec2,
) -> Vec<Option<usize>> {
    let mut distances = vec![None; tiles.len()];
    distances[index_for(origin.x as u8, origin.y as u8, width)] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back((origin, 0usize));
    while let Some((position, distance)) = queue.pop_front() {
        for next in neighbors(position, width, height) {
            let index = index_for(next.x as u8, next.y as u8, width);
            if tiles[index] != TileKind::Wall && distances[index].is_none() {
                distances[index] = Some(distance + 1);
                queue.push_back((next, distance + 1));
            }
        }
    }
    distances
}

/// The main map structure: dimensions, tile grid, and warp links.
///
/// A map is only ever produced whole, by the decoder or the generator,
/// and is immutable afterward; it may be freely shared for read-only
/// access across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: u8,
    height: u8,
    /// One element per tile, row-major; bit-packing exists only on the wire.
    tiles: Vec<TileKind>,
    start: UVec2,
    /// Source tile index to destination tile index.
    warps: HashMap<usize, usize>,
}

impl Map {
    pub(crate) fn from_parts(
        width: u8,
        height: u8,
        tiles: Vec<TileKind>,
        start: UVec2,
        warps: HashMap<usize, usize>,
    ) -> Map {
        Map {
            width,
            height,
            tiles,
            start,
            warps,
        }
    }

    /// The map width in tiles.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// The map height in tiles.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// The total tile count.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The position of the start tile.
    pub fn start(&self) -> UVec2 {
        self.start
    }

    /// Looks up the tile kind at a position.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn tile_at(&self, x: u8, y: u8) -> TileKind {
        assert!(
            x < self.width && y < self.height,
            "tile position ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.tiles[index_for(x, y, self.width)]
    }

    /// The raw tile sequence, row-major.
    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// The warp links, source tile index to destination tile index.
    pub fn warps(&self) -> &HashMap<usize, usize> {
        &self.warps
    }

    /// The destination of the warp at `(x, y)`, if that tile is a warp.
    pub fn warp_destination(&self, x: u8, y: u8) -> Option<UVec2> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.warps
            .get(&index_for(x, y, self.width))
            .map(|&index| coords_for(index, self.width))
    }

    /// Checks the structural invariants shared by the decoder and the
    /// generator: exactly one start, at least one required goal, every
    /// warp tile linked to an in-bounds destination, and an item count
    /// the wire format can represent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let area = self.area();
        if area <= 1 {
            return Err(ValidationError::MapTooSmall { area });
        }
        if self.tiles.len() != area {
            return Err(ValidationError::TileCountMismatch {
                expected: area,
                actual: self.tiles.len(),
            });
        }

        let starts = self.tiles.iter().filter(|&&kind| kind == TileKind::Start).count();
        if starts != 1 {
            return Err(ValidationError::StartCount(starts));
        }
        let start_in_bounds = self.start.x < self.width as u32 && self.start.y < self.height as u32;
        if !start_in_bounds
            || self.tiles[index_for(self.start.x as u8, self.start.y as u8, self.width)] != TileKind::Start
        {
            return Err(ValidationError::StartMismatch {
                x: self.start.x,
                y: self.start.y,
            });
        }

        if !self.tiles.iter().any(|&kind| kind == TileKind::RequiredGoal) {
            return Err(ValidationError::MissingRequiredGoal);
        }

        let items = self
            .tiles
            .iter()
            .filter(|&&kind| {
                matches!(kind, TileKind::RequiredGoal | TileKind::OptionalGoal | TileKind::Warp)
            })
            .count();
        if items > MAX_ITEMS {
            return Err(ValidationError::TooManyItems { count: items });
        }

        for (index, &kind) in self.tiles.iter().enumerate() {
            if kind == TileKind::Warp && !self.warps.contains_key(&index) {
                return Err(ValidationError::WarpWithoutTarget { index });
            }
        }
        for (&source, &target) in &self.warps {
            if source >= area || self.tiles[source] != TileKind::Warp {
                return Err(ValidationError::TargetWithoutWarp { index: source });
            }
            if target >= area {
                return Err(ValidationError::WarpTargetOutOfBounds { source_index: source, target });
            }
        }

        Ok(())
    }

    /// Whether at least one required goal can be reached from the start
    /// through non-wall tiles.
    pub fn required_goal_reachable(&self) -> bool {
        if self.start.x >= self.width as u32 || self.start.y >= self.height as u32 {
            return false;
        }
        let distances = flood_distances(&self.tiles, self.width, self.height, self.start);
        self.tiles
            .iter()
            .enumerate()
            .any(|(index, &kind)| kind == TileKind::RequiredGoal && distances[index].is_some())
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&MapRenderer::render(self))
    }
}
