#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications)]

//! Projection of clinical metadata from a parsed data set
//! to a flat, camelCase JSON record.
//!
//! The record covers the patient, study and image geometry attributes
//! a viewer needs; absent attributes are omitted from the output.
//! Decimal-string attributes (rescale and windowing parameters)
//! are passed along as strings, exactly as stored.

use dcmview_core::tags;
use dcmview_parser::DataSet;
use serde::Serialize;

/// The selected metadata of one DICOM instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Patient's Name (0010,0010)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    /// Patient ID (0010,0020)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Patient's Birth Date (0010,0030)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_birth_date: Option<String>,
    /// Patient's Sex (0010,0040)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_sex: Option<String>,
    /// Study Instance UID (0020,000D)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_instance_uid: Option<String>,
    /// Study Date (0008,0020)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_date: Option<String>,
    /// Study Time (0008,0030)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_time: Option<String>,
    /// Study Description (0008,1030)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_description: Option<String>,
    /// Rows (0028,0010)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u16>,
    /// Columns (0028,0011)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u16>,
    /// Bits Allocated (0028,0100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_allocated: Option<u16>,
    /// Bits Stored (0028,0101)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits_stored: Option<u16>,
    /// Samples per Pixel (0028,0002)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples_per_pixel: Option<u16>,
    /// Photometric Interpretation (0028,0004)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photometric_interpretation: Option<String>,
    /// Rescale Intercept (0028,1052)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescale_intercept: Option<String>,
    /// Rescale Slope (0028,1053)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescale_slope: Option<String>,
    /// Window Center (0028,1050)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_center: Option<String>,
    /// Window Width (0028,1051)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<String>,
}

impl MetadataRecord {
    /// Select the named attributes from a parsed data set.
    pub fn from_dataset(dataset: &DataSet<'_>) -> Self {
        let text = |tag| dataset.string(tag).map(str::to_string);
        MetadataRecord {
            patient_name: text(tags::PATIENT_NAME),
            patient_id: text(tags::PATIENT_ID),
            patient_birth_date: text(tags::PATIENT_BIRTH_DATE),
            patient_sex: text(tags::PATIENT_SEX),
            study_instance_uid: text(tags::STUDY_INSTANCE_UID),
            study_date: text(tags::STUDY_DATE),
            study_time: text(tags::STUDY_TIME),
            study_description: text(tags::STUDY_DESCRIPTION),
            rows: dataset.uint16(tags::ROWS),
            columns: dataset.uint16(tags::COLUMNS),
            bits_allocated: dataset.uint16(tags::BITS_ALLOCATED),
            bits_stored: dataset.uint16(tags::BITS_STORED),
            samples_per_pixel: dataset.uint16(tags::SAMPLES_PER_PIXEL),
            photometric_interpretation: text(tags::PHOTOMETRIC_INTERPRETATION),
            rescale_intercept: text(tags::RESCALE_INTERCEPT),
            rescale_slope: text(tags::RESCALE_SLOPE),
            window_center: text(tags::WINDOW_CENTER),
            window_width: text(tags::WINDOW_WIDTH),
        }
    }

    /// Serialize the record to a JSON string.
    pub fn to_json_string(&self) -> String {
        // a flat record of strings and numbers cannot fail to serialize
        serde_json::to_string(self).expect("metadata record serializes")
    }
}
