//! The main data set parser.
//!
//! Elements are indexed, not materialized:
//! each [`RawElement`] records where its value lives
//! in the original buffer.
//! Undefined-length elements are resolved by a flat scan
//! over their item sequence,
//! which is sufficient for encapsulated pixel data;
//! recursive sequence parsing is not performed.

use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use dcmview_core::source::{self, ByteSource};
use dcmview_core::{tags, Length, Tag, TransferSyntax, VR};
use snafu::{ensure, OptionExt, ResultExt, Snafu};

/// An error while indexing the main data set.
#[derive(Debug, Snafu)]
pub enum Error {
    /// An element could not be fully read.
    #[snafu(display("Could not read data set element"))]
    UnexpectedEndOfData {
        /// underlying reader error
        source: source::Error,
    },

    /// An element header carried an unparsable VR code.
    #[snafu(display("Invalid value representation {:?} at position {}", bytes, position))]
    InvalidVr {
        /// the two VR bytes as read
        bytes: [u8; 2],
        /// absolute offset of the element header
        position: usize,
    },

    /// An undefined-length element contained something other than
    /// items and a sequence delimiter.
    #[snafu(display("Invalid sequence structure at position {}: found {}", position, tag))]
    InvalidLength {
        /// the unexpected tag
        tag: Tag,
        /// absolute offset of the unexpected tag
        position: usize,
    },

    /// The element loop stopped making progress.
    #[snafu(display("Data set parser did not advance at position {}", position))]
    NoProgress {
        /// the stalled position
        position: usize,
    },
}

/// Result alias for data set operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A data element descriptor: tag, VR and the location
/// of the value bytes in the original buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawElement {
    /// attribute tag
    pub tag: Tag,
    /// value representation (`UN` when parsed without an explicit VR)
    pub vr: VR,
    /// value length in bytes, with undefined lengths already resolved
    pub length: u32,
    /// absolute offset of the first value byte
    pub offset: usize,
}

/// An ordered, non-owning index of the elements of one data set.
///
/// The index borrows the buffer it was parsed from;
/// element values are byte ranges into that buffer.
#[derive(Debug)]
pub struct DataSet<'a> {
    data: &'a [u8],
    endianness: Endianness,
    elements: Vec<RawElement>,
}

impl<'a> DataSet<'a> {
    /// Index the data set that starts at `start` in `data`,
    /// following the VR mode and endianness of the given transfer syntax.
    pub fn read_from(
        data: &'a [u8],
        start: usize,
        transfer_syntax: TransferSyntax,
    ) -> Result<Self> {
        let explicit_vr = transfer_syntax.explicit_vr();
        let mut source = ByteSource::new(data, transfer_syntax.endianness());
        source.seek(start).context(UnexpectedEndOfDataSnafu)?;

        let mut elements = Vec::new();
        // a tag plus the shortest length field take 8 bytes
        while source.remaining() >= 8 {
            let header_start = source.position();
            let group = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
            let element = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
            let tag = Tag(group, element);
            if tag == Tag(0x0000, 0x0000) {
                break;
            }

            let (vr, length) = if explicit_vr {
                let vr_bytes = source.read_bytes(2).context(UnexpectedEndOfDataSnafu)?;
                let vr_bytes = [vr_bytes[0], vr_bytes[1]];
                let vr = VR::from_binary(vr_bytes).context(InvalidVrSnafu {
                    bytes: vr_bytes,
                    position: header_start,
                })?;
                let length = if vr.uses_four_byte_length() {
                    source.skip(2).context(UnexpectedEndOfDataSnafu)?;
                    source.read_u32().context(UnexpectedEndOfDataSnafu)?
                } else {
                    u32::from(source.read_u16().context(UnexpectedEndOfDataSnafu)?)
                };
                (vr, Length(length))
            } else {
                let length = source.read_u32().context(UnexpectedEndOfDataSnafu)?;
                (VR::UN, Length(length))
            };

            let element = match length.get() {
                None => read_undefined_length_value(&mut source, tag, vr)?,
                Some(length) => {
                    let offset = source.position();
                    source
                        .skip(length as usize)
                        .context(UnexpectedEndOfDataSnafu)?;
                    RawElement {
                        tag,
                        vr,
                        length,
                        offset,
                    }
                }
            };
            elements.push(element);

            ensure!(
                source.position() > header_start,
                NoProgressSnafu {
                    position: header_start
                }
            );
        }

        Ok(DataSet {
            data,
            endianness: transfer_syntax.endianness(),
            elements,
        })
    }

    /// The elements of this data set, in stream order.
    pub fn elements(&self) -> &[RawElement] {
        &self.elements
    }

    /// The endianness of multi-byte values in this data set.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Find the first element with the given tag, in insertion order.
    pub fn find(&self, tag: Tag) -> Option<&RawElement> {
        self.elements.iter().find(|e| e.tag == tag)
    }

    /// Fetch the value bytes of the first element with the given tag.
    pub fn value_bytes(&self, tag: Tag) -> Option<&'a [u8]> {
        let e = self.find(tag)?;
        Some(&self.data[e.offset..e.offset + e.length as usize])
    }

    /// Fetch an element value as text,
    /// with trailing space and NUL padding excluded.
    pub fn string(&self, tag: Tag) -> Option<&'a str> {
        let bytes = self.value_bytes(tag)?;
        let text = std::str::from_utf8(bytes).ok()?;
        Some(text.trim_end_matches([' ', '\0']))
    }

    /// Fetch an element value as a 16-bit unsigned integer,
    /// honoring the data set endianness.
    pub fn uint16(&self, tag: Tag) -> Option<u16> {
        let bytes = self.value_bytes(tag)?;
        if bytes.len() < 2 {
            return None;
        }
        Some(match self.endianness {
            Endianness::Little => LittleEndian::read_u16(bytes),
            Endianness::Big => BigEndian::read_u16(bytes),
        })
    }

    /// Fetch an element value as a 32-bit unsigned integer,
    /// honoring the data set endianness.
    pub fn uint32(&self, tag: Tag) -> Option<u32> {
        let bytes = self.value_bytes(tag)?;
        if bytes.len() < 4 {
            return None;
        }
        Some(match self.endianness {
            Endianness::Little => LittleEndian::read_u32(bytes),
            Endianness::Big => BigEndian::read_u32(bytes),
        })
    }
}

/// Resolve the value span of an undefined-length element
/// by scanning its flat item sequence up to the sequence delimiter.
fn read_undefined_length_value(
    source: &mut ByteSource<'_>,
    tag: Tag,
    vr: VR,
) -> Result<RawElement> {
    let value_offset = source.position();
    loop {
        let item_position = source.position();
        let group = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
        let element = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
        let item_tag = Tag(group, element);
        let item_length = Length(source.read_u32().context(UnexpectedEndOfDataSnafu)?);

        match item_tag {
            tags::ITEM => {
                // items inside an undefined-length element
                // must themselves have a defined length
                let item_length = item_length.get().context(InvalidLengthSnafu {
                    tag: item_tag,
                    position: item_position,
                })?;
                source
                    .skip(item_length as usize)
                    .context(UnexpectedEndOfDataSnafu)?;
            }
            tags::SEQUENCE_DELIMITER => {
                // the value span ends right before the delimiter header
                let length = (item_position - value_offset) as u32;
                return Ok(RawElement {
                    tag,
                    vr,
                    length,
                    offset: value_offset,
                });
            }
            _ => {
                return InvalidLengthSnafu {
                    tag: item_tag,
                    position: item_position,
                }
                .fail()
            }
        }
    }
}
