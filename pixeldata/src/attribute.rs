//! Utility module for fetching key attributes from a parsed data set.

use dcmview_core::tags;
use dcmview_parser::DataSet;
use snafu::{OptionExt, Snafu};

/// An error fetching a required image attribute.
#[derive(Debug, Snafu)]
pub enum GetAttributeError {
    /// The attribute is absent from the data set.
    #[snafu(display("Missing required attribute `{}`", name))]
    MissingRequiredField {
        /// attribute name
        name: &'static str,
    },
}

/// Result alias for attribute lookups.
pub type Result<T, E = GetAttributeError> = std::result::Result<T, E>;

/// Get the Rows from the data set
pub fn rows(dataset: &DataSet<'_>) -> Result<u16> {
    dataset
        .uint16(tags::ROWS)
        .context(MissingRequiredFieldSnafu { name: "Rows" })
}

/// Get the Columns from the data set
pub fn columns(dataset: &DataSet<'_>) -> Result<u16> {
    dataset
        .uint16(tags::COLUMNS)
        .context(MissingRequiredFieldSnafu { name: "Columns" })
}

/// Get the BitsAllocated from the data set, defaulting to 16
pub fn bits_allocated(dataset: &DataSet<'_>) -> u16 {
    dataset.uint16(tags::BITS_ALLOCATED).unwrap_or(16)
}

/// Get the BitsStored from the data set,
/// defaulting to the full allocated size
pub fn bits_stored(dataset: &DataSet<'_>) -> u16 {
    dataset
        .uint16(tags::BITS_STORED)
        .unwrap_or_else(|| bits_allocated(dataset))
}

/// Get the SamplesPerPixel from the data set, defaulting to 1
pub fn samples_per_pixel(dataset: &DataSet<'_>) -> u16 {
    dataset.uint16(tags::SAMPLES_PER_PIXEL).unwrap_or(1)
}

/// Get the PhotometricInterpretation from the data set,
/// defaulting to MONOCHROME2
pub fn photometric_interpretation(dataset: &DataSet<'_>) -> String {
    dataset
        .string(tags::PHOTOMETRIC_INTERPRETATION)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "MONOCHROME2".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmview_core::TransferSyntax;
    use dcmview_parser::DataSet;

    #[test]
    fn defaults_apply_when_attributes_are_absent() {
        let dataset = DataSet::read_from(&[], 0, TransferSyntax::ExplicitVrLittleEndian).unwrap();
        assert!(rows(&dataset).is_err());
        assert_eq!(bits_allocated(&dataset), 16);
        assert_eq!(bits_stored(&dataset), 16);
        assert_eq!(samples_per_pixel(&dataset), 1);
        assert_eq!(photometric_interpretation(&dataset), "MONOCHROME2");
    }
}
