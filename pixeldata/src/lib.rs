#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(missing_debug_implementations, unused_qualifications)]

//! Decoding of DICOM pixel data into displayable 8-bit rasters.
//!
//! [`DecodedPixelData`] gathers the image geometry attributes and the
//! pixel data of a parsed file. Native (uncompressed) pixel data is
//! borrowed straight from the file buffer; encapsulated pixel data is
//! de-framed and the first frame is decoded with the matching codec:
//! JPEG Lossless through [`dcmview_jpeg`],
//! JPEG Baseline through the `jpeg-decoder` crate.
//! JPEG 2000 and RLE Lossless data sets are refused.
//!
//! The conversion methods produce 8-bit grayscale or RGB output:
//! 16-bit samples are auto-windowed over their actual range,
//! color samples are reduced by the usual luma weights,
//! and `MONOCHROME1` images are inverted so that black stays 0.

pub mod attribute;
pub mod encapsulation;

use std::borrow::Cow;

use byteorder::{ByteOrder, LittleEndian};
use dcmview_core::{tags, TransferSyntax};
use dcmview_jpeg::{DecodedImage, LosslessDecoder};
use dcmview_parser::DicomFile;
use snafu::{ensure, OptionExt, ResultExt, Snafu};

pub use attribute::GetAttributeError;

/// An error from decoding pixel data.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The data set has no pixel data element.
    #[snafu(display("Pixel data element (7FE0,0010) is missing"))]
    PixelDataNotFound,

    /// The pixel data or its geometry attributes are inconsistent.
    #[snafu(display("Invalid pixel data: {}", reason))]
    InvalidPixelData {
        /// what was wrong
        reason: &'static str,
    },

    /// A required geometry attribute is missing.
    #[snafu(display("Could not gather image attributes"))]
    GetAttribute {
        /// underlying attribute error
        source: attribute::GetAttributeError,
    },

    /// The pixel data codec of this transfer syntax is not implemented.
    #[snafu(display("Decoding pixel data in `{}` is not supported", name))]
    UnsupportedTransferSyntax {
        /// descriptive transfer syntax name
        name: &'static str,
    },

    /// The JPEG Lossless frame could not be decoded.
    #[snafu(display("Could not decode lossless JPEG frame"))]
    DecodeJpegLossless {
        /// underlying decoder error
        source: dcmview_jpeg::Error,
    },

    /// The JPEG Baseline frame could not be decoded.
    #[snafu(display("Could not decode baseline JPEG frame"))]
    DecodeJpegBaseline {
        /// underlying decoder error
        source: jpeg_decoder::Error,
    },
}

/// Result alias for pixel data decoding.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Pixel data in a normalized, display-ready form.
///
/// Native pixel data borrows the file buffer;
/// decoded compressed frames own their samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPixelData<'a> {
    /// raw samples, interleaved by component
    pub data: Cow<'a, [u8]>,
    /// image height in pixels
    pub rows: u16,
    /// image width in pixels
    pub columns: u16,
    /// bits allocated per sample (8 or 16)
    pub bits_allocated: u16,
    /// bits effectively stored per sample
    pub bits_stored: u16,
    /// samples per pixel (1 or 3)
    pub samples_per_pixel: u16,
    /// photometric interpretation of the samples
    pub photometric_interpretation: String,
}

impl<'a> DecodedPixelData<'a> {
    /// Gather the pixel data of a parsed file,
    /// decoding the first frame when the transfer syntax
    /// encapsulates compressed frames.
    pub fn decode(file: &DicomFile<'a>) -> Result<Self> {
        let dataset = &file.dataset;
        let mut rows = attribute::rows(dataset).context(GetAttributeSnafu)?;
        let mut columns = attribute::columns(dataset).context(GetAttributeSnafu)?;
        let mut bits_allocated = attribute::bits_allocated(dataset);
        let mut bits_stored = attribute::bits_stored(dataset);
        let mut samples_per_pixel = attribute::samples_per_pixel(dataset);
        let photometric_interpretation = attribute::photometric_interpretation(dataset);
        let pixel_data = dataset
            .value_bytes(tags::PIXEL_DATA)
            .context(PixelDataNotFoundSnafu)?;

        let data: Cow<'a, [u8]> = if file.transfer_syntax.is_encapsulated() {
            let image = decode_encapsulated_frame(pixel_data, file.transfer_syntax)?;
            if (image.width, image.height) != (columns, rows) {
                tracing::warn!(
                    "Decoded frame is {}x{}, data set declares {}x{}",
                    image.width,
                    image.height,
                    columns,
                    rows
                );
            }
            // decoded frames are always 8-bit rasters
            rows = image.height;
            columns = image.width;
            bits_allocated = 8;
            bits_stored = 8;
            samples_per_pixel = u16::from(image.channels);
            Cow::Owned(image.data)
        } else {
            Cow::Borrowed(pixel_data)
        };

        ensure!(
            bits_allocated == 8 || bits_allocated == 16,
            InvalidPixelDataSnafu {
                reason: "unsupported bits allocated"
            }
        );
        ensure!(
            samples_per_pixel == 1 || samples_per_pixel == 3,
            InvalidPixelDataSnafu {
                reason: "unsupported samples per pixel"
            }
        );
        ensure!(
            samples_per_pixel == 1 || bits_allocated == 8,
            InvalidPixelDataSnafu {
                reason: "multi-sample pixel data must be 8-bit"
            }
        );
        let expected = usize::from(rows)
            * usize::from(columns)
            * usize::from(samples_per_pixel)
            * usize::from(bits_allocated / 8);
        ensure!(
            data.len() >= expected,
            InvalidPixelDataSnafu {
                reason: "pixel data shorter than the declared geometry"
            }
        );

        Ok(DecodedPixelData {
            data,
            rows,
            columns,
            bits_allocated,
            bits_stored,
            samples_per_pixel,
            photometric_interpretation,
        })
    }

    /// Convert to one 8-bit grayscale sample per pixel.
    ///
    /// 16-bit samples are auto-windowed over their actual range;
    /// color samples are reduced by the 0.299/0.587/0.114 luma weights;
    /// `MONOCHROME1` output is inverted.
    pub fn to_grayscale8(&self) -> Vec<u8> {
        let pixel_count = usize::from(self.rows) * usize::from(self.columns);
        let mut out = if self.samples_per_pixel == 3 {
            self.data[..pixel_count * 3]
                .chunks_exact(3)
                .map(|rgb| luma(rgb[0], rgb[1], rgb[2]))
                .collect()
        } else if self.bits_allocated == 16 {
            rescale_u16_to_u8(&self.data[..pixel_count * 2])
        } else {
            self.data[..pixel_count].to_vec()
        };

        if self.photometric_interpretation == "MONOCHROME1" {
            for sample in &mut out {
                *sample = 255 - *sample;
            }
        }
        out
    }

    /// Convert to 8-bit interleaved RGB.
    ///
    /// Data that is already 8-bit RGB passes through unchanged;
    /// everything else replicates the grayscale plane
    /// into three channels.
    pub fn to_rgb8(&self) -> Vec<u8> {
        if self.samples_per_pixel == 3 && self.bits_allocated == 8 {
            let pixel_count = usize::from(self.rows) * usize::from(self.columns);
            return self.data[..pixel_count * 3].to_vec();
        }
        let gray = self.to_grayscale8();
        let mut out = Vec::with_capacity(gray.len() * 3);
        for sample in gray {
            out.extend_from_slice(&[sample, sample, sample]);
        }
        out
    }
}

// 16-bit samples are read little-endian regardless of the data set
// endianness; auto-windowing maps the actual sample range to 0..=255.
fn rescale_u16_to_u8(data: &[u8]) -> Vec<u8> {
    let samples: Vec<u16> = data
        .chunks_exact(2)
        .map(|pair| LittleEndian::read_u16(pair))
        .collect();
    let min = samples.iter().copied().min().unwrap_or(0);
    let max = samples.iter().copied().max().unwrap_or(0);
    if min == max {
        return vec![0; samples.len()];
    }
    let range = u32::from(max - min);
    samples
        .iter()
        .map(|&s| (u32::from(s - min) * 255 / range) as u8)
        .collect()
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let value = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    value.round().clamp(0.0, 255.0) as u8
}

fn decode_encapsulated_frame(value: &[u8], ts: TransferSyntax) -> Result<DecodedImage> {
    // refused codecs fail before any frame is touched
    ensure!(
        matches!(
            ts,
            TransferSyntax::JpegLossless | TransferSyntax::JpegBaseline
        ),
        UnsupportedTransferSyntaxSnafu { name: ts.name() }
    );
    let frames = encapsulation::extract_frames(value)?;
    // only the first frame is decoded
    let frame = frames[0];
    match ts {
        TransferSyntax::JpegLossless => LosslessDecoder::new(frame)
            .decode()
            .context(DecodeJpegLosslessSnafu),
        _ => decode_baseline_jpeg(frame),
    }
}

// Baseline (DCT) frames are delegated to the jpeg-decoder crate.
fn decode_baseline_jpeg(frame: &[u8]) -> Result<DecodedImage> {
    let mut decoder = jpeg_decoder::Decoder::new(frame);
    let data = decoder.decode().context(DecodeJpegBaselineSnafu)?;
    let info = decoder.info().context(InvalidPixelDataSnafu {
        reason: "baseline decoder reported no image info",
    })?;
    let channels = match info.pixel_format {
        jpeg_decoder::PixelFormat::L8 => 1,
        jpeg_decoder::PixelFormat::RGB24 => 3,
        _ => {
            return InvalidPixelDataSnafu {
                reason: "unsupported baseline pixel format",
            }
            .fail()
        }
    };
    Ok(DecodedImage {
        data,
        width: info.width,
        height: info.height,
        channels,
    })
}
