//! End-to-end pixel data decoding over synthetic DICOM files.

use dcmview_parser::DicomFile;
use dcmview_pixeldata::{DecodedPixelData, Error};
use std::borrow::Cow;

fn short_element(tag: (u16, u16), vr: &[u8; 2], value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + value.len());
    out.extend_from_slice(&tag.0.to_le_bytes());
    out.extend_from_slice(&tag.1.to_le_bytes());
    out.extend_from_slice(vr);
    out.extend_from_slice(&(value.len() as u16).to_le_bytes());
    out.extend_from_slice(value);
    out
}

fn long_element(tag: (u16, u16), vr: &[u8; 2], value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + value.len());
    out.extend_from_slice(&tag.0.to_le_bytes());
    out.extend_from_slice(&tag.1.to_le_bytes());
    out.extend_from_slice(vr);
    out.extend_from_slice(&[0x00, 0x00]);
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value);
    out
}

fn file_prefix(transfer_syntax_uid: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; 128];
    data.extend_from_slice(b"DICM");
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
    data.extend_from_slice(&short_element((0x0002, 0x0010), b"UI", transfer_syntax_uid));
    data
}

fn geometry_elements(rows: u16, columns: u16, bits_allocated: u16, photometric: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&short_element(
        (0x0028, 0x0002),
        b"US",
        &1u16.to_le_bytes(),
    ));
    out.extend_from_slice(&short_element((0x0028, 0x0004), b"CS", photometric));
    out.extend_from_slice(&short_element(
        (0x0028, 0x0010),
        b"US",
        &rows.to_le_bytes(),
    ));
    out.extend_from_slice(&short_element(
        (0x0028, 0x0011),
        b"US",
        &columns.to_le_bytes(),
    ));
    out.extend_from_slice(&short_element(
        (0x0028, 0x0100),
        b"US",
        &bits_allocated.to_le_bytes(),
    ));
    out
}

fn encapsulated_pixel_data(frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    // (7FE0,0010) OB, undefined length
    out.extend_from_slice(&[
        0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
    ]);
    // empty basic offset table
    out.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0, 0x00, 0x00, 0x00, 0x00]);
    // one frame item
    out.extend_from_slice(&[0xFE, 0xFF, 0x00, 0xE0]);
    out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
    out.extend_from_slice(frame);
    // sequence delimiter
    out.extend_from_slice(&[0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00]);
    out
}

// A hand-assembled SOF3 stream: 2x2, 8-bit, one component,
// predictor 1, samples 10/20/30/40 in raster order.
// The Huffman table maps magnitude category c to the 4-bit code c.
const LOSSLESS_FRAME: &[u8] = &[
    0xFF, 0xD8, // SOI
    0xFF, 0xC4, 0x00, 0x1D, // DHT, 29 bytes
    0x00, // class 0, destination 0
    0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x00, // ten 4-bit codes
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, // values
    0xFF, 0xC3, 0x00, 0x0B, // SOF3, 11 bytes
    0x08, // precision
    0x00, 0x02, 0x00, 0x02, // 2x2
    0x01, 0x01, 0x11, 0x00, // one component
    0xFF, 0xDA, 0x00, 0x08, // SOS, 8 bytes
    0x01, 0x01, 0x00, // one component, DC table 0
    0x01, 0x00, 0x00, // predictor 1, no point transform
    0x71, 0x29, 0x4B, 0x44, 0xAF, // entropy-coded differences
    0xFF, 0xD9, // EOI
    0x00, // pad to even length
];

#[test]
fn decodes_native_monochrome1_file() {
    let mut data = file_prefix(b"1.2.840.10008.1.2.1\0");
    data.extend_from_slice(&geometry_elements(2, 2, 8, b"MONOCHROME1 "));
    data.extend_from_slice(&long_element((0x7FE0, 0x0010), b"OB", &[0, 64, 192, 255]));

    let file = DicomFile::parse(&data).unwrap();
    let decoded = DecodedPixelData::decode(&file).unwrap();
    assert!(matches!(decoded.data, Cow::Borrowed(_)));
    assert_eq!(decoded.photometric_interpretation, "MONOCHROME1");
    assert_eq!(decoded.to_grayscale8(), vec![255, 191, 63, 0]);
}

#[test]
fn decodes_native_16_bit_file_with_auto_window() {
    let mut data = file_prefix(b"1.2.840.10008.1.2.1\0");
    data.extend_from_slice(&geometry_elements(1, 2, 16, b"MONOCHROME2 "));
    let mut pixels = Vec::new();
    pixels.extend_from_slice(&1000u16.to_le_bytes());
    pixels.extend_from_slice(&4000u16.to_le_bytes());
    data.extend_from_slice(&long_element((0x7FE0, 0x0010), b"OW", &pixels));

    let file = DicomFile::parse(&data).unwrap();
    let decoded = DecodedPixelData::decode(&file).unwrap();
    assert_eq!(decoded.bits_allocated, 16);
    assert_eq!(decoded.to_grayscale8(), vec![0, 255]);
}

#[test]
fn decodes_encapsulated_lossless_jpeg_file() {
    let mut data = file_prefix(b"1.2.840.10008.1.2.4.70\0");
    data.extend_from_slice(&geometry_elements(2, 2, 16, b"MONOCHROME2 "));
    data.extend_from_slice(&encapsulated_pixel_data(LOSSLESS_FRAME));

    let file = DicomFile::parse(&data).unwrap();
    let decoded = DecodedPixelData::decode(&file).unwrap();
    // compressed frames are decoded to an owned 8-bit raster
    assert!(matches!(decoded.data, Cow::Owned(_)));
    assert_eq!(decoded.bits_allocated, 8);
    assert_eq!(decoded.samples_per_pixel, 1);
    assert_eq!(decoded.rows, 2);
    assert_eq!(decoded.columns, 2);
    assert_eq!(decoded.data.as_ref(), &[10, 20, 30, 40]);
    assert_eq!(decoded.to_rgb8(), vec![10, 10, 10, 20, 20, 20, 30, 30, 30, 40, 40, 40]);
}

#[test]
fn refuses_jpeg_2000_pixel_data() {
    let mut data = file_prefix(b"1.2.840.10008.1.2.4.90\0");
    data.extend_from_slice(&geometry_elements(2, 2, 16, b"MONOCHROME2 "));
    data.extend_from_slice(&encapsulated_pixel_data(b"not actually a codestream"));

    let file = DicomFile::parse(&data).unwrap();
    let err = DecodedPixelData::decode(&file).unwrap_err();
    assert!(matches!(err, Error::UnsupportedTransferSyntax { .. }));
}

#[test]
fn missing_pixel_data_is_reported() {
    let mut data = file_prefix(b"1.2.840.10008.1.2.1\0");
    data.extend_from_slice(&geometry_elements(2, 2, 8, b"MONOCHROME2 "));

    let file = DicomFile::parse(&data).unwrap();
    let err = DecodedPixelData::decode(&file).unwrap_err();
    assert!(matches!(err, Error::PixelDataNotFound));
}
