//! Map decoding: converting a binary stream into a validated map.

use std::collections::HashMap;
use std::io::Read;

use glam::UVec2;
use tracing::{debug, trace};

use crate::constants::{TileKind, FORMAT_VERSION, MAGIC, MSB, TAG_OPTIONAL_GOAL, TAG_REQUIRED_GOAL, TAG_WARP};
use crate::error::DecodeError;
use crate::map::wire::{ByteOrder, ItemRecord, StreamReader};
use crate::map::{index_for, Map};

/// Decoder for the binary map format.
pub struct MapDecoder;

impl MapDecoder {
    /// Decodes a complete map stream.
    ///
    /// Decoding is strictly sequential and fails fast on the first
    /// violated invariant; no partial map is ever returned. Bytes beyond
    /// the final declared field are never read.
    ///
    /// # Errors
    ///
    /// Returns the typed error naming the offending field: a bad marker,
    /// magic, or version; a degenerate area; a bitmap too short for the
    /// grid; a start or item placed on anything but an open path tile; an
    /// unrecognized item tag; a missing required goal; or a stream that
    /// ends before a declared field does.
    pub fn decode(bytes: &[u8]) -> Result<Map, DecodeError> {
        let mut stream = StreamReader::new(bytes);

        let marker = stream.byte()?;
        let order = ByteOrder::from_marker(marker).ok_or(DecodeError::InvalidByteOrder(marker))?;

        let magic = [stream.byte()?, stream.byte()?];
        let version = stream.byte()?;
        if magic != MAGIC || version != FORMAT_VERSION {
            return Err(DecodeError::InvalidHeader);
        }

        let width = stream.byte()?;
        let height = stream.byte()?;
        let area = width as usize * height as usize;
        if area <= 1 {
            return Err(DecodeError::MapTooSmall { area });
        }

        // A declared length may be anything the signed field can hold;
        // the bit budget check also rejects negative values.
        let declared = stream.i16(order)?;
        let available_bits = declared as i64 * 8;
        if area as i64 > available_bits {
            return Err(DecodeError::InsufficientBitmapData {
                needed_bits: area,
                available_bits,
            });
        }
        let bitmap = stream.take(declared as usize)?;

        let mut tiles = vec![TileKind::Path; area];
        let mut index = 0;
        'bitmap: for byte in bitmap {
            for bit in 0..8u32 {
                if index >= area {
                    // Excess bits are read but carry no tiles.
                    break 'bitmap;
                }
                if (*byte << bit) & MSB != 0 {
                    tiles[index] = TileKind::Wall;
                }
                index += 1;
            }
        }
        trace!(
            width,
            height,
            walls = tiles.iter().filter(|&&kind| kind == TileKind::Wall).count(),
            "unpacked wall bitmap"
        );

        let start_x = stream.byte()?;
        let start_y = stream.byte()?;
        let open = start_x < width && start_y < height && tiles[index_for(start_x, start_y, width)] == TileKind::Path;
        if !open {
            return Err(DecodeError::InvalidStartPosition {
                x: start_x,
                y: start_y,
            });
        }
        tiles[index_for(start_x, start_y, width)] = TileKind::Start;

        let item_count = stream.byte()?;
        let mut warps = HashMap::new();
        let mut has_required_goal = false;
        for _ in 0..item_count {
            let record = Self::read_item(&mut stream, width, height, &tiles)?;
            let index = index_for(record.pos().x as u8, record.pos().y as u8, width);
            match record {
                ItemRecord::RequiredGoal { .. } => {
                    has_required_goal = true;
                    tiles[index] = TileKind::RequiredGoal;
                }
                ItemRecord::OptionalGoal { .. } => {
                    tiles[index] = TileKind::OptionalGoal;
                }
                ItemRecord::Warp { dest, .. } => {
                    tiles[index] = TileKind::Warp;
                    warps.insert(index, index_for(dest.x as u8, dest.y as u8, width));
                }
            }
        }
        if !has_required_goal {
            return Err(DecodeError::MissingRequiredGoal);
        }

        debug!(width, height, items = item_count, warps = warps.len(), "decoded map");
        Ok(Map::from_parts(
            width,
            height,
            tiles,
            UVec2::new(start_x as u32, start_y as u32),
            warps,
        ))
    }

    /// Buffers a reader to its end, then decodes the bytes.
    pub fn decode_from<R: Read>(mut reader: R) -> Result<Map, DecodeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode(&bytes)
    }

    /// Reads one item record and checks its placement against the tiles
    /// already claimed.
    fn read_item(
        stream: &mut StreamReader<'_>,
        width: u8,
        height: u8,
        tiles: &[TileKind],
    ) -> Result<ItemRecord, DecodeError> {
        let tag = stream.byte()?;
        let x = stream.byte()?;
        let y = stream.byte()?;

        let open = x < width && y < height && tiles[index_for(x, y, width)] == TileKind::Path;
        if !open {
            return Err(DecodeError::InvalidItemPosition { x, y });
        }
        let pos = UVec2::new(x as u32, y as u32);

        match tag {
            TAG_REQUIRED_GOAL => Ok(ItemRecord::RequiredGoal { pos }),
            TAG_OPTIONAL_GOAL => Ok(ItemRecord::OptionalGoal { pos }),
            TAG_WARP => {
                let dest_x = stream.byte()?;
                let dest_y = stream.byte()?;
                // The destination's tile kind is deliberately not
                // checked; chained and degenerate warps are representable.
                if dest_x >= width || dest_y >= height {
                    return Err(DecodeError::InvalidItemPosition { x: dest_x, y: dest_y });
                }
                Ok(ItemRecord::Warp {
                    pos,
                    dest: UVec2::new(dest_x as u32, dest_y as u32),
                })
            }
            unknown => Err(DecodeError::UnknownItemKind(unknown)),
        }
    }
}
