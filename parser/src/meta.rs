//! Data structures and readers of the DICOM file meta information group.
//!
//! The file meta group is always encoded in Explicit VR Little Endian,
//! regardless of the transfer syntax it declares for the rest of the file.

use dcmview_core::source::{self, ByteSource};
use dcmview_core::{tags, Length, Tag, VR};
use snafu::{ensure, OptionExt, ResultExt, Snafu};

const DICM_MAGIC_CODE: [u8; 4] = [b'D', b'I', b'C', b'M'];

/// Number of bytes in the opaque file preamble.
pub const PREAMBLE_LENGTH: usize = 128;

// bound on the number of file meta elements,
// so that a malformed group cannot stall the parser
const META_GROUP_ELEMENT_CAP: usize = 100;

/// An error while reading the file meta group.
#[derive(Debug, Snafu)]
pub enum Error {
    /// The input is too short to hold the preamble and magic code.
    #[snafu(display("Invalid preamble: only {} bytes of input", len))]
    InvalidPreamble {
        /// total input length
        len: usize,
    },

    /// The magic code `DICM` was not found after the preamble.
    #[snafu(display("Invalid DICOM file (magic code check failed)"))]
    InvalidPrefix,

    /// A file meta element could not be fully read.
    #[snafu(display("Could not read file meta element"))]
    UnexpectedEndOfData {
        /// underlying reader error
        source: source::Error,
    },

    /// A file meta element header carried an unparsable VR code.
    #[snafu(display("Invalid value representation {:?} at position {}", bytes, position))]
    InvalidVr {
        /// the two VR bytes as read
        bytes: [u8; 2],
        /// absolute offset of the element header
        position: usize,
    },

    /// A file meta element carried an implausible value length.
    #[snafu(display("Invalid length for file meta element tagged {}", tag))]
    InvalidLength {
        /// the offending element's tag
        tag: Tag,
    },

    /// A required file meta element is missing.
    #[snafu(display("Missing file meta element `{}`", alias))]
    MissingElement {
        /// name of the missing attribute
        alias: &'static str,
    },
}

/// Result alias for file meta operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information Table.
///
/// Unlike the main data set index, the string fields here are owned
/// copies, so the table may outlive the source buffer. UID values are
/// stored as read, including any trailing padding; use the getter
/// methods for trimmed views.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaTable {
    /// the opaque 128-byte file preamble
    pub preamble: [u8; PREAMBLE_LENGTH],
    /// the magic code following the preamble, always `DICM`
    pub prefix: [u8; 4],
    /// File Meta Information Group Length
    pub group_length: u32,
    /// Media Storage SOP Class UID
    pub media_storage_sop_class_uid: String,
    /// Media Storage SOP Instance UID
    pub media_storage_sop_instance_uid: String,
    /// Transfer Syntax UID
    pub transfer_syntax: String,
    /// Implementation Class UID
    pub implementation_class_uid: Option<String>,
    /// absolute offset of the first element of the main data set
    pub data_set_start: usize,
}

fn trim_uid(value: &str) -> &str {
    value.trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
}

impl FileMetaTable {
    /// Read the file meta group from the start of a DICOM file buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ensure!(
            data.len() >= PREAMBLE_LENGTH + 4,
            InvalidPreambleSnafu { len: data.len() }
        );
        let mut preamble = [0u8; PREAMBLE_LENGTH];
        preamble.copy_from_slice(&data[..PREAMBLE_LENGTH]);
        ensure!(
            data[PREAMBLE_LENGTH..PREAMBLE_LENGTH + 4] == DICM_MAGIC_CODE,
            InvalidPrefixSnafu
        );

        // the file meta group is always Explicit VR Little Endian
        let mut source = ByteSource::little_endian(data);
        source
            .seek(PREAMBLE_LENGTH + 4)
            .context(UnexpectedEndOfDataSnafu)?;

        let mut builder = FileMetaTableBuilder::new().preamble(preamble);

        for _ in 0..META_GROUP_ELEMENT_CAP {
            if source.remaining() < 8 {
                break;
            }
            let header_start = source.position();
            let group = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
            let element = source.read_u16().context(UnexpectedEndOfDataSnafu)?;
            let tag = Tag(group, element);
            if group != 0x0002 {
                // the main data set starts here; leave the tag unread
                source.seek(header_start).context(UnexpectedEndOfDataSnafu)?;
                break;
            }

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
            // no file meta element has an undefined length
            let length = Length(length).get().context(InvalidLengthSnafu { tag })?;
            let value = source
                .read_bytes(length as usize)
                .context(UnexpectedEndOfDataSnafu)?;

            builder = match tag {
                tags::FILE_META_INFORMATION_GROUP_LENGTH => {
                    ensure!(value.len() == 4, InvalidLengthSnafu { tag });
                    let len = u32::from_le_bytes([value[0], value[1], value[2], value[3]]);
                    builder.group_length(len)
                }
                tags::MEDIA_STORAGE_SOP_CLASS_UID => {
                    builder.media_storage_sop_class_uid(String::from_utf8_lossy(value))
                }
                tags::MEDIA_STORAGE_SOP_INSTANCE_UID => {
                    builder.media_storage_sop_instance_uid(String::from_utf8_lossy(value))
                }
                tags::TRANSFER_SYNTAX_UID => {
                    builder.transfer_syntax(String::from_utf8_lossy(value))
                }
                tags::IMPLEMENTATION_CLASS_UID => {
                    builder.implementation_class_uid(String::from_utf8_lossy(value))
                }
                tag => {
                    // unsupported or non-standard file meta attribute
                    tracing::info!("Unknown file meta tag {}", tag);
                    builder
                }
            };
        }

        builder.data_set_start(source.position()).build()
    }

    /// Getter for the transfer syntax UID,
    /// with trailing characters already excluded.
    pub fn transfer_syntax(&self) -> &str {
        trim_uid(&self.transfer_syntax)
    }

    /// Getter for the media storage SOP class UID,
    /// with trailing characters already excluded.
    pub fn media_storage_sop_class_uid(&self) -> &str {
        trim_uid(&self.media_storage_sop_class_uid)
    }

    /// Getter for the media storage SOP instance UID,
    /// with trailing characters already excluded.
    pub fn media_storage_sop_instance_uid(&self) -> &str {
        trim_uid(&self.media_storage_sop_instance_uid)
    }

    /// Getter for the implementation class UID,
    /// with trailing characters already excluded.
    pub fn implementation_class_uid(&self) -> Option<&str> {
        self.implementation_class_uid.as_deref().map(trim_uid)
    }
}

/// A builder for [`FileMetaTable`],
/// reporting which required attribute is missing on build.
#[derive(Debug, Default, Clone)]
pub struct FileMetaTableBuilder {
    preamble: Option<[u8; PREAMBLE_LENGTH]>,
    group_length: Option<u32>,
    media_storage_sop_class_uid: Option<String>,
    media_storage_sop_instance_uid: Option<String>,
    transfer_syntax: Option<String>,
    implementation_class_uid: Option<String>,
    data_set_start: Option<usize>,
}

impl FileMetaTableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        FileMetaTableBuilder::default()
    }

    /// Define the file preamble.
    pub fn preamble(mut self, value: [u8; PREAMBLE_LENGTH]) -> Self {
        self.preamble = Some(value);
        self
    }

    /// Define the file meta information group length.
    pub fn group_length(mut self, value: u32) -> Self {
        self.group_length = Some(value);
        self
    }

    /// Define the media storage SOP class UID.
    pub fn media_storage_sop_class_uid(mut self, value: impl Into<String>) -> Self {
        self.media_storage_sop_class_uid = Some(value.into());
        self
    }

    /// Define the media storage SOP instance UID.
    pub fn media_storage_sop_instance_uid(mut self, value: impl Into<String>) -> Self {
        self.media_storage_sop_instance_uid = Some(value.into());
        self
    }

    /// Define the transfer syntax UID.
    pub fn transfer_syntax(mut self, value: impl Into<String>) -> Self {
        self.transfer_syntax = Some(value.into());
        self
    }

    /// Define the implementation class UID.
    pub fn implementation_class_uid(mut self, value: impl Into<String>) -> Self {
        self.implementation_class_uid = Some(value.into());
        self
    }

    /// Define the offset at which the main data set starts.
    pub fn data_set_start(mut self, value: usize) -> Self {
        self.data_set_start = Some(value);
        self
    }

    /// Build the table, failing on any missing required attribute.
    pub fn build(self) -> Result<FileMetaTable> {
        let media_storage_sop_class_uid = self.media_storage_sop_class_uid.context(
            MissingElementSnafu {
                alias: "MediaStorageSOPClassUID",
            },
        )?;
        let media_storage_sop_instance_uid = self.media_storage_sop_instance_uid.context(
            MissingElementSnafu {
                alias: "MediaStorageSOPInstanceUID",
            },
        )?;
        let transfer_syntax = self.transfer_syntax.context(MissingElementSnafu {
            alias: "TransferSyntaxUID",
        })?;
        Ok(FileMetaTable {
            preamble: self.preamble.unwrap_or([0; PREAMBLE_LENGTH]),
            prefix: DICM_MAGIC_CODE,
            group_length: self.group_length.unwrap_or(0),
            media_storage_sop_class_uid,
            media_storage_sop_instance_uid,
            transfer_syntax,
            implementation_class_uid: self.implementation_class_uid,
            data_set_start: self.data_set_start.unwrap_or(PREAMBLE_LENGTH + 4),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, FileMetaTable};

    fn short_element(tag: (u16, u16), vr: &[u8; 2], value: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + value.len());
        out.extend_from_slice(&tag.0.to_le_bytes());
        out.extend_from_slice(&tag.1.to_le_bytes());
        out.extend_from_slice(vr);
        out.extend_from_slice(&(value.len() as u16).to_le_bytes());
        out.extend_from_slice(value);
        out
    }

    fn minimal_file_bytes() -> Vec<u8> {
        let mut data = vec![0u8; 128];
        data.extend_from_slice(b"DICM");
        data.extend_from_slice(&short_element(
            (0x0002, 0x0000),
            b"UL",
            &100u32.to_le_bytes(),
        ));
        data.extend_from_slice(&short_element(
            (0x0002, 0x0002),
            b"UI",
            b"1.2.840.10008.5.1.4.1.1.7\0",
        ));
        data.extend_from_slice(&short_element(
            (0x0002, 0x0003),
            b"UI",
            b"1.2.3.4.5.6.7.8.9\0",
        ));
        data.extend_from_slice(&short_element(
            (0x0002, 0x0010),
            b"UI",
            b"1.2.840.10008.1.2.1\0",
        ));
        data
    }

    #[test]
    fn reads_minimal_file_meta() {
        let mut data = minimal_file_bytes();
        let meta_end = data.len();
        // one main data set element after the group: (0008,0020) DA "20230102"
        data.extend_from_slice(&short_element((0x0008, 0x0020), b"DA", b"20230102"));

        let table = FileMetaTable::from_bytes(&data).unwrap();
        assert_eq!(&table.prefix, b"DICM");
        assert_eq!(table.group_length, 100);
        assert_eq!(
            table.media_storage_sop_class_uid(),
            "1.2.840.10008.5.1.4.1.1.7"
        );
        assert_eq!(table.media_storage_sop_instance_uid(), "1.2.3.4.5.6.7.8.9");
        assert_eq!(table.transfer_syntax(), "1.2.840.10008.1.2.1");
        assert_eq!(table.implementation_class_uid(), None);
        // the cursor was rolled back to the start of the off-group tag
        assert_eq!(table.data_set_start, meta_end);
    }

    #[test]
    fn rejects_short_input() {
        let err = FileMetaTable::from_bytes(&[0u8; 64]).unwrap_err();
        assert!(matches!(err, Error::InvalidPreamble { len: 64 }));
    }

    #[test]
    fn rejects_bad_magic_code() {
        let mut data = vec![0u8; 128];
        data.extend_from_slice(b"DCIM");
        let err = FileMetaTable::from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidPrefix));
    }

    #[test]
    fn requires_transfer_syntax() {
        let mut data = vec![0u8; 128];
        data.extend_from_slice(b"DICM");
        data.extend_from_slice(&short_element((0x0002, 0x0002), b"UI", b"1.2\0"));
        data.extend_from_slice(&short_element((0x0002, 0x0003), b"UI", b"1.3\0"));
        let err = FileMetaTable::from_bytes(&data).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingElement {
                alias: "TransferSyntaxUID"
            }
        ));
    }

    #[test]
    fn skips_unknown_meta_elements() {
        let mut data = minimal_file_bytes();
        // (0002,0013) Implementation Version Name, not retained
        data.extend_from_slice(&short_element((0x0002, 0x0013), b"SH", b"DCMVIEW_01"));
        let table = FileMetaTable::from_bytes(&data).unwrap();
        assert_eq!(table.transfer_syntax(), "1.2.840.10008.1.2.1");
        assert_eq!(table.data_set_start, data.len());
    }
}
