//! Low-level wire primitives shared by the decoder and encoder.

use glam::UVec2;

use crate::constants::{TAG_OPTIONAL_GOAL, TAG_REQUIRED_GOAL, TAG_WARP};
use crate::error::DecodeError;

/// Byte order declared by a stream's first byte; every multi-byte field
/// after the marker is interpreted through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Interprets a stream's byte-order marker.
    pub fn from_marker(marker: u8) -> Option<ByteOrder> {
        match marker {
            0 => Some(ByteOrder::Big),
            1 => Some(ByteOrder::Little),
            _ => None,
        }
    }

    /// The marker byte announcing this order at the head of a stream.
    pub fn marker(self) -> u8 {
        match self {
            ByteOrder::Big => 0,
            ByteOrder::Little => 1,
        }
    }

    pub fn decode_i16(self, bytes: [u8; 2]) -> i16 {
        match self {
            ByteOrder::Big => i16::from_be_bytes(bytes),
            ByteOrder::Little => i16::from_le_bytes(bytes),
        }
    }

    pub fn encode_i16(self, value: i16) -> [u8; 2] {
        match self {
            ByteOrder::Big => value.to_be_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
        }
    }
}

/// A placement consumed from or written to a stream's item list.
///
/// Only the warp variant carries a destination; goals structurally
/// cannot. Records exist at the wire boundary only and are discarded
/// once the tile grid and warp table are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ItemRecord {
    RequiredGoal { pos: UVec2 },
    OptionalGoal { pos: UVec2 },
    Warp { pos: UVec2, dest: UVec2 },
}

impl ItemRecord {
    pub(crate) fn pos(&self) -> UVec2 {
        match *self {
            ItemRecord::RequiredGoal { pos }
            | ItemRecord::OptionalGoal { pos }
            | ItemRecord::Warp { pos, .. } => pos,
        }
    }

    /// Serializes the record, tag first, warp destination last.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            ItemRecord::RequiredGoal { pos } => {
                out.extend_from_slice(&[TAG_REQUIRED_GOAL, pos.x as u8, pos.y as u8]);
            }
            ItemRecord::OptionalGoal { pos } => {
                out.extend_from_slice(&[TAG_OPTIONAL_GOAL, pos.x as u8, pos.y as u8]);
            }
            ItemRecord::Warp { pos, dest } => {
                out.extend_from_slice(&[TAG_WARP, pos.x as u8, pos.y as u8, dest.x as u8, dest.y as u8]);
            }
        }
    }
}

/// Sequential reader over an in-memory stream.
///
/// Every read is bounds-checked; a short read surfaces as
/// [`DecodeError::TruncatedStream`]. Nothing is ever read beyond what a
/// caller asks for, so trailing bytes stay untouched.
pub(crate) struct StreamReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> StreamReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> StreamReader<'a> {
        StreamReader { bytes, pos: 0 }
    }

    pub(crate) fn byte(&mut self) -> Result<u8, DecodeError> {
        let value = *self.bytes.get(self.pos).ok_or(DecodeError::TruncatedStream)?;
        self.pos += 1;
        Ok(value)
    }

    pub(crate) fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(count).ok_or(DecodeError::TruncatedStream)?;
        let slice = self.bytes.get(self.pos..end).ok_or(DecodeError::TruncatedStream)?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn i16(&mut self, order: ByteOrder) -> Result<i16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(order.decode_i16([bytes[0], bytes[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_round_trip() {
        assert_eq!(ByteOrder::from_marker(0), Some(ByteOrder::Big));
        assert_eq!(ByteOrder::from_marker(1), Some(ByteOrder::Little));
        assert_eq!(ByteOrder::from_marker(2), None);
        assert_eq!(ByteOrder::Big.marker(), 0);
        assert_eq!(ByteOrder::Little.marker(), 1);
    }

    #[test]
    fn test_i16_byte_orders() {
        assert_eq!(ByteOrder::Big.decode_i16([0x01, 0x00]), 256);
        assert_eq!(ByteOrder::Little.decode_i16([0x01, 0x00]), 1);
        assert_eq!(ByteOrder::Big.encode_i16(256), [0x01, 0x00]);
        assert_eq!(ByteOrder::Little.encode_i16(256), [0x00, 0x01]);
        assert_eq!(ByteOrder::Big.decode_i16([0xFF, 0xFF]), -1);
    }

    #[test]
    fn test_reader_truncation() {
        let mut reader = StreamReader::new(&[1, 2]);
        assert_eq!(reader.byte().unwrap(), 1);
        assert_eq!(reader.byte().unwrap(), 2);
        assert!(matches!(reader.byte(), Err(DecodeError::TruncatedStream)));
    }

    #[test]
    fn test_reader_take_does_not_advance_on_failure() {
        let mut reader = StreamReader::new(&[1, 2, 3]);
        assert!(matches!(reader.take(4), Err(DecodeError::TruncatedStream)));
        assert_eq!(reader.take(3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_item_record_encoding() {
        let mut out = Vec::new();
        ItemRecord::Warp {
            pos: UVec2::new(1, 2),
            dest: UVec2::new(3, 4),
        }
        .encode_into(&mut out);
        assert_eq!(out, vec![TAG_WARP, 1, 2, 3, 4]);

        out.clear();
        ItemRecord::RequiredGoal { pos: UVec2::new(5, 6) }.encode_into(&mut out);
        assert_eq!(out, vec![TAG_REQUIRED_GOAL, 5, 6]);
    }
}
