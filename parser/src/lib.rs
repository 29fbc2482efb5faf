#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications)]

//! A parser of DICOM part-10 files.
//!
//! Parsing happens in two stages,
//! both operating on one in-memory byte buffer
//! supplied and owned by the caller:
//!
//! 1. the file meta group ([`meta::FileMetaTable`]),
//!    always encoded in Explicit VR Little Endian,
//!    which yields the transfer syntax of the rest of the file;
//! 2. the main data set ([`dataset::DataSet`]),
//!    an ordered index of element descriptors.
//!
//! The data set index is deliberately *non-owning*:
//! each element records the offset and length of its value
//! in the original buffer,
//! so the index must not outlive that buffer.

pub mod dataset;
pub mod meta;

use dcmview_core::TransferSyntax;
use snafu::{OptionExt, ResultExt, Snafu};

pub use dataset::{DataSet, RawElement};
pub use meta::{FileMetaTable, FileMetaTableBuilder};

/// An error from parsing a complete DICOM file.
#[derive(Debug, Snafu)]
pub enum Error {
    /// Could not read the file meta group.
    #[snafu(display("Could not read file meta group"))]
    ReadMeta {
        /// underlying file meta error
        source: meta::Error,
    },

    /// The transfer syntax declared in the file meta group
    /// is not recognized by this toolkit.
    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    UnsupportedTransferSyntax {
        /// the declared transfer syntax UID
        uid: String,
    },

    /// Could not read the main data set.
    #[snafu(display("Could not read data set"))]
    ReadDataSet {
        /// underlying data set error
        source: dataset::Error,
    },
}

/// Result alias for whole-file parsing.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A parsed DICOM file:
/// the owned file meta table
/// plus the non-owning main data set index,
/// both derived from one caller-owned buffer.
#[derive(Debug)]
pub struct DicomFile<'a> {
    /// the file meta group
    pub meta: FileMetaTable,
    /// the main data set element index
    pub dataset: DataSet<'a>,
    /// the transfer syntax resolved from the file meta group
    pub transfer_syntax: TransferSyntax,
}

impl<'a> DicomFile<'a> {
    /// Parse a DICOM file from the given bytes.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let meta = FileMetaTable::from_bytes(data).context(ReadMetaSnafu)?;
        let transfer_syntax =
            TransferSyntax::from_uid(meta.transfer_syntax()).context(UnsupportedTransferSyntaxSnafu {
                uid: meta.transfer_syntax(),
            })?;
        let dataset =
            DataSet::read_from(data, meta.data_set_start, transfer_syntax).context(ReadDataSetSnafu)?;
        Ok(DicomFile {
            meta,
            dataset,
            transfer_syntax,
        })
    }
}
