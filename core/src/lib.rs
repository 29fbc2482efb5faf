#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! Core data types for reading DICOM files.
//!
//! This crate contains the basic vocabulary shared by the rest of the
//! workspace: attribute tags, value representations, element lengths,
//! the transfer syntaxes understood by this toolkit,
//! and a typed cursor over in-memory DICOM data.

pub mod header;
pub mod source;
pub mod tags;
pub mod transfer_syntax;

pub use header::{Length, Tag, VR};
pub use source::ByteSource;
pub use transfer_syntax::TransferSyntax;
