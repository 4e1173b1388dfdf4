//! Plain-text map rendering.

use crate::constants::TileKind;
use crate::map::Map;

/// Renders maps into human-viewable text, one glyph per tile.
pub struct MapRenderer;

impl MapRenderer {
    /// Maps a tile kind to its display glyph.
    pub fn glyph(kind: TileKind) -> char {
        match kind {
            TileKind::Path => ' ',
            TileKind::Wall => '█',
            TileKind::Start => 'S',
            TileKind::RequiredGoal => 'G',
            TileKind::OptionalGoal => 'O',
            TileKind::Warp => 'W',
        }
    }

    /// Renders the full grid as `height` newline-terminated rows of
    /// `width` glyphs. A purely read-only projection of the map.
    pub fn render(map: &Map) -> String {
        let mut out = String::with_capacity(map.area() * '█'.len_utf8() + map.height() as usize);
        for y in 0..map.height() {
            for x in 0..map.width() {
                out.push(Self::glyph(map.tile_at(x, y)));
            }
            out.push('\n');
        }
        out
    }
}
