//! The transfer syntaxes understood by this toolkit.
//!
//! A transfer syntax fixes the data set encoding rules:
//! whether element headers carry an explicit VR,
//! the endianness of multi-byte values,
//! and whether the pixel data is delivered
//! as an encapsulated item sequence of compressed frames.
//!
//! The set of recognized syntaxes is closed by design.
//! Syntaxes which are recognized but whose pixel data codec
//! is not implemented (JPEG 2000, RLE) are refused
//! at the pixel data layer.

use byteordered::Endianness;
use std::fmt;

/// An enumeration of the transfer syntaxes recognized by this toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferSyntax {
    /// Implicit VR Little Endian: Default Transfer Syntax for DICOM
    ImplicitVrLittleEndian,
    /// Explicit VR Little Endian
    ExplicitVrLittleEndian,
    /// Explicit VR Big Endian
    ExplicitVrBigEndian,
    /// JPEG Baseline (Process 1)
    JpegBaseline,
    /// JPEG Lossless, Non-Hierarchical, First-Order Prediction
    /// (Process 14 \[Selection Value 1\])
    JpegLossless,
    /// JPEG 2000 Image Compression (Lossless Only)
    Jpeg2000Lossless,
    /// JPEG 2000 Image Compression
    Jpeg2000,
    /// RLE Lossless
    RleLossless,
}

/// All recognized transfer syntaxes, for exhaustive checks.
pub const ALL_TRANSFER_SYNTAXES: [TransferSyntax; 8] = [
    TransferSyntax::ImplicitVrLittleEndian,
    TransferSyntax::ExplicitVrLittleEndian,
    TransferSyntax::ExplicitVrBigEndian,
    TransferSyntax::JpegBaseline,
    TransferSyntax::JpegLossless,
    TransferSyntax::Jpeg2000Lossless,
    TransferSyntax::Jpeg2000,
    TransferSyntax::RleLossless,
];

impl TransferSyntax {
    /// Obtain the transfer syntax registered under the given UID.
    /// Trailing whitespace and NUL padding are excluded
    /// before the comparison.
    pub fn from_uid(uid: &str) -> Option<Self> {
        let uid = uid.trim_end_matches(|c: char| c.is_whitespace() || c == '\0');
        match uid {
            "1.2.840.10008.1.2" => Some(TransferSyntax::ImplicitVrLittleEndian),
            "1.2.840.10008.1.2.1" => Some(TransferSyntax::ExplicitVrLittleEndian),
            "1.2.840.10008.1.2.2" => Some(TransferSyntax::ExplicitVrBigEndian),
            "1.2.840.10008.1.2.4.50" => Some(TransferSyntax::JpegBaseline),
            "1.2.840.10008.1.2.4.70" => Some(TransferSyntax::JpegLossless),
            "1.2.840.10008.1.2.4.90" => Some(TransferSyntax::Jpeg2000Lossless),
            "1.2.840.10008.1.2.4.91" => Some(TransferSyntax::Jpeg2000),
            "1.2.840.10008.1.2.5" => Some(TransferSyntax::RleLossless),
            _ => None,
        }
    }

    /// The UID under which this transfer syntax is registered.
    pub fn uid(self) -> &'static str {
        match self {
            TransferSyntax::ImplicitVrLittleEndian => "1.2.840.10008.1.2",
            TransferSyntax::ExplicitVrLittleEndian => "1.2.840.10008.1.2.1",
            TransferSyntax::ExplicitVrBigEndian => "1.2.840.10008.1.2.2",
            TransferSyntax::JpegBaseline => "1.2.840.10008.1.2.4.50",
            TransferSyntax::JpegLossless => "1.2.840.10008.1.2.4.70",
            TransferSyntax::Jpeg2000Lossless => "1.2.840.10008.1.2.4.90",
            TransferSyntax::Jpeg2000 => "1.2.840.10008.1.2.4.91",
            TransferSyntax::RleLossless => "1.2.840.10008.1.2.5",
        }
    }

    /// The descriptive name of this transfer syntax.
    pub fn name(self) -> &'static str {
        match self {
            TransferSyntax::ImplicitVrLittleEndian => "Implicit VR Little Endian",
            TransferSyntax::ExplicitVrLittleEndian => "Explicit VR Little Endian",
            TransferSyntax::ExplicitVrBigEndian => "Explicit VR Big Endian",
            TransferSyntax::JpegBaseline => "JPEG Baseline (Process 1)",
            TransferSyntax::JpegLossless => {
                "JPEG Lossless, Non-Hierarchical, First-Order Prediction"
            }
            TransferSyntax::Jpeg2000Lossless => "JPEG 2000 Image Compression (Lossless Only)",
            TransferSyntax::Jpeg2000 => "JPEG 2000 Image Compression",
            TransferSyntax::RleLossless => "RLE Lossless",
        }
    }

    /// Whether data sets in this transfer syntax
    /// carry an explicit VR in each element header.
    pub fn explicit_vr(self) -> bool {
        !matches!(self, TransferSyntax::ImplicitVrLittleEndian)
    }

    /// The endianness of multi-byte values in the main data set.
    pub fn endianness(self) -> Endianness {
        match self {
            TransferSyntax::ExplicitVrBigEndian => Endianness::Big,
            _ => Endianness::Little,
        }
    }

    /// Whether the pixel data is encapsulated
    /// as an item sequence of compressed frames.
    pub fn is_encapsulated(self) -> bool {
        matches!(
            self,
            TransferSyntax::JpegBaseline
                | TransferSyntax::JpegLossless
                | TransferSyntax::Jpeg2000Lossless
                | TransferSyntax::Jpeg2000
                | TransferSyntax::RleLossless
        )
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
