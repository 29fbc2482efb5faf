//! Extraction of compressed frames from encapsulated pixel data.
//!
//! Encapsulated pixel data is the value of an undefined-length
//! `(7FE0,0010)` element: an optional basic offset table item,
//! then one item per compressed frame,
//! closed by a sequence delimiter.
//! Frames are emitted as borrowed views into the element value.

use byteorder::{ByteOrder, LittleEndian};
use dcmview_core::{tags, Tag};
use smallvec::SmallVec;
use snafu::ensure;

use crate::{InvalidPixelDataSnafu, Result};

/// Frame views into an encapsulated pixel data value.
/// Single-frame images are the overwhelmingly common case.
pub type Frames<'a> = SmallVec<[&'a [u8]; 1]>;

fn read_item_header(value: &[u8], pos: usize) -> (Tag, usize) {
    let tag = Tag(
        LittleEndian::read_u16(&value[pos..]),
        LittleEndian::read_u16(&value[pos + 2..]),
    );
    let length = LittleEndian::read_u32(&value[pos + 4..]) as usize;
    (tag, length)
}

/// Walk the item sequence of an encapsulated pixel data value
/// and collect one view per frame.
///
/// The basic offset table, when present and plausible,
/// is skipped without interpretation;
/// only the item payloads that follow it are treated as frames.
/// An encapsulated value with no extractable frame is an error.
pub fn extract_frames(value: &[u8]) -> Result<Frames<'_>> {
    let mut frames = Frames::new();
    let mut pos = 0;

    // the leading item is the basic offset table:
    // skipped whole when it holds a table of 32-bit offsets,
    // consumed as an empty header otherwise
    if value.len() >= 8 {
        let (tag, length) = read_item_header(value, pos);
        if tag == tags::ITEM {
            if length == 0 {
                pos = 8;
            } else if length % 4 == 0 && length <= value.len() - 8 {
                pos = 8 + length;
            }
        }
    }

    while value.len() - pos >= 8 {
        let (tag, length) = read_item_header(value, pos);
        pos += 8;
        if tag == tags::ITEM && length > 0 && length <= value.len() - pos {
            frames.push(&value[pos..pos + length]);
            pos += length;
        } else {
            if tag != tags::SEQUENCE_DELIMITER {
                tracing::warn!("Encapsulated frame walk stopped at {}", tag);
            }
            break;
        }
    }

    ensure!(
        !frames.is_empty(),
        InvalidPixelDataSnafu {
            reason: "no frames in encapsulated pixel data"
        }
    );
    Ok(frames)
}
