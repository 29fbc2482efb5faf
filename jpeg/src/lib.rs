#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications)]

//! A decoder for lossless JPEG (ITU-T T.81 Annex H),
//! the predictive, Huffman-coded JPEG variant
//! used by the DICOM JPEG Lossless transfer syntaxes.
//!
//! The decoder covers the non-hierarchical Huffman processes
//! (SOF3 frames): marker and segment parsing, Huffman table
//! construction, bit-level entropy decoding with byte stuffing and
//! restart markers, predictor reconstruction, and down-mapping of
//! high-precision samples to an 8-bit raster.
//!
//! Arithmetic-coded and DCT-based processes are rejected;
//! use a general-purpose JPEG library for baseline images.

pub mod bitstream;
pub mod decoder;
pub mod huffman;
pub mod marker;

use snafu::Snafu;

pub use bitstream::BitReader;
pub use decoder::{DecodedImage, LosslessDecoder};
pub use huffman::HuffmanTable;
pub use marker::Marker;

/// An error from decoding a lossless JPEG stream.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// A marker was malformed or found out of place.
    #[snafu(display("Invalid JPEG marker byte {:#04X}", marker))]
    InvalidMarker {
        /// the offending byte
        marker: u8,
    },

    /// The frame uses a coding process other than lossless Huffman.
    #[snafu(display("Unsupported JPEG coding process (SOF{})", sof))]
    UnsupportedFormat {
        /// the frame type as declared by its SOF marker
        sof: u8,
    },

    /// The frame uses arithmetic entropy coding.
    #[snafu(display("Arithmetic coding is not supported"))]
    ArithmeticCodingNotSupported,

    /// The SOF segment is malformed.
    #[snafu(display("Invalid frame header: {}", reason))]
    InvalidFrameHeader {
        /// what was wrong
        reason: &'static str,
    },

    /// The SOS segment is malformed or inconsistent with the frame.
    #[snafu(display("Invalid scan header: {}", reason))]
    InvalidScanHeader {
        /// what was wrong
        reason: &'static str,
    },

    /// A DHT segment is malformed.
    #[snafu(display("Invalid Huffman table: {}", reason))]
    InvalidHuffmanTable {
        /// what was wrong
        reason: &'static str,
    },

    /// The entropy stream contained a bit pattern
    /// which no Huffman code maps to.
    #[snafu(display("Invalid Huffman code in entropy-coded segment"))]
    InvalidHuffmanCode,

    /// A decoded magnitude category is out of range.
    #[snafu(display("Invalid sample magnitude category {}", ssss))]
    InvalidCategory {
        /// the decoded category
        ssss: u8,
    },

    /// The stream ended before the decode was complete.
    #[snafu(display("Unexpected end of JPEG data"))]
    UnexpectedEndOfData,
}

/// Result alias for JPEG decoding.
pub type Result<T, E = Error> = std::result::Result<T, E>;
