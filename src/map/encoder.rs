//! Map encoding: serializing a map back into its binary stream.

use std::io::{self, Write};

use crate::constants::{TileKind, FORMAT_VERSION, HEADER_LEN, MAGIC, MSB};
use crate::map::wire::{ByteOrder, ItemRecord};
use crate::map::{coords_for, Map};

/// Encoder producing the binary map format.
///
/// The left inverse of the decoder: decoding an encoded map yields an
/// equal map. Encoding cannot fail for a map that upholds the structural
/// invariants, since the item-count ceiling is one of them.
pub struct MapEncoder;

impl MapEncoder {
    /// The byte order this encoder emits, recorded in the marker byte.
    /// The decoder accepts either.
    pub const ORDER: ByteOrder = ByteOrder::Little;

    /// Encodes a map into a fresh byte buffer.
    pub fn encode(map: &Map) -> Vec<u8> {
        let area = map.area();
        let bitmap_len = area.div_ceil(8);
        let mut bytes = Vec::with_capacity(HEADER_LEN + 2 + bitmap_len + 3 + map.warps().len() * 5);

        bytes.push(Self::ORDER.marker());
        bytes.extend_from_slice(&MAGIC);
        bytes.push(FORMAT_VERSION);
        bytes.push(map.width());
        bytes.push(map.height());
        bytes.extend_from_slice(&Self::ORDER.encode_i16(bitmap_len as i16));

        // Wall bits, most significant first, row-major.
        let mut current = 0u8;
        for (index, &kind) in map.tiles().iter().enumerate() {
            if kind == TileKind::Wall {
                current |= MSB >> (index % 8);
            }
            if index % 8 == 7 {
                bytes.push(current);
                current = 0;
            }
        }
        if area % 8 != 0 {
            bytes.push(current);
        }

        bytes.push(map.start().x as u8);
        bytes.push(map.start().y as u8);

        // One record per goal or warp tile, in row-major index order.
        let mut records = Vec::new();
        for (index, &kind) in map.tiles().iter().enumerate() {
            let pos = coords_for(index, map.width());
            match kind {
                TileKind::RequiredGoal => records.push(ItemRecord::RequiredGoal { pos }),
                TileKind::OptionalGoal => records.push(ItemRecord::OptionalGoal { pos }),
                TileKind::Warp => records.push(ItemRecord::Warp {
                    pos,
                    dest: coords_for(map.warps()[&index], map.width()),
                }),
                _ => {}
            }
        }
        bytes.push(records.len() as u8);
        for record in &records {
            record.encode_into(&mut bytes);
        }

        bytes
    }

    /// Encodes a map and writes the bytes to `writer`.
    pub fn encode_to<W: Write>(map: &Map, mut writer: W) -> io::Result<()> {
        writer.write_all(&Self::encode(map))
    }
}
