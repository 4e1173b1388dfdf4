mod common;

use common::{open_3x3, optional_goal, required_goal, scenario_2x2, warp};
use mazemap::constants::TileKind;
use mazemap::map::decoder::MapDecoder;
use mazemap::map::generator::MazeGenerator;
use mazemap::map::render::MapRenderer;
use mazemap::rng::MazeRng;
use pretty_assertions::assert_eq;

#[test]
fn test_renders_scenario() {
    let map = MapDecoder::decode(&scenario_2x2()).unwrap();
    assert_eq!(MapRenderer::render(&map), "S█\n G\n");
}

#[test]
fn test_renders_every_glyph() {
    let bytes = open_3x3(&[required_goal(2, 0), optional_goal(0, 1), warp(1, 1, 0, 0)]);
    let map = MapDecoder::decode(&bytes).unwrap();
    assert_eq!(MapRenderer::render(&map), "S G\nOW \n   \n");
}

#[test]
fn test_display_matches_renderer() {
    let map = MapDecoder::decode(&scenario_2x2()).unwrap();
    assert_eq!(format!("{map}"), MapRenderer::render(&map));
}

#[test]
fn test_rendered_shape_of_generated_map() {
    let mut rng = MazeRng::new(77);
    let map = MazeGenerator::generate(13, 6, 1, &mut rng).unwrap();
    let rendered = MapRenderer::render(&map);

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), map.height() as usize);
    for line in &lines {
        assert_eq!(line.chars().count(), map.width() as usize);
    }
    assert!(rendered.ends_with('\n'));

    let starts = rendered.chars().filter(|&glyph| glyph == 'S').count();
    assert_eq!(starts, 1);
    assert!(rendered.contains('G'));
    assert!(rendered.contains('W'));
    assert_eq!(map.tile_at(map.start().x as u8, map.start().y as u8), TileKind::Start);
}
