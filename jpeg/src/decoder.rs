//! The lossless JPEG frame decoder:
//! segment parsing, scan reconstruction and 8-bit output mapping.

use byteorder::{BigEndian, ByteOrder};
use snafu::{ensure, OptionExt};

use crate::bitstream::BitReader;
use crate::huffman::HuffmanTable;
use crate::marker::Marker;
use crate::{
    ArithmeticCodingNotSupportedSnafu, InvalidCategorySnafu, InvalidFrameHeaderSnafu,
    InvalidHuffmanTableSnafu, InvalidMarkerSnafu, InvalidScanHeaderSnafu, Result,
    UnexpectedEndOfDataSnafu, UnsupportedFormatSnafu,
};

/// A decoded raster of 8-bit samples, interleaved by component.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// samples in raster order, interleaved by component
    pub data: Vec<u8>,
    /// image width in pixels
    pub width: u16,
    /// image height in pixels
    pub height: u16,
    /// number of components per pixel
    pub channels: u8,
}

#[derive(Debug, Clone)]
struct FrameComponent {
    id: u8,
    horizontal_sampling: u8,
    vertical_sampling: u8,
    dc_table_index: usize,
}

#[derive(Debug, Clone)]
struct FrameInfo {
    precision: u8,
    height: u16,
    width: u16,
    components: Vec<FrameComponent>,
}

#[derive(Debug, Clone, Copy)]
struct ScanInfo {
    predictor: u8,
    point_transform: u8,
}

/// A decoder for one lossless Huffman-coded JPEG stream.
#[derive(Debug)]
pub struct LosslessDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    frame: Option<FrameInfo>,
    dc_tables: [Option<HuffmanTable>; 4],
    restart_interval: u16,
}

impl<'a> LosslessDecoder<'a> {
    /// Create a decoder over a complete JPEG stream,
    /// from SOI marker to entropy-coded data.
    pub fn new(data: &'a [u8]) -> Self {
        LosslessDecoder {
            data,
            pos: 0,
            frame: None,
            dc_tables: [None, None, None, None],
            restart_interval: 0,
        }
    }

    /// Decode the stream into an 8-bit raster.
    ///
    /// Samples with a precision above 8 bits are down-mapped
    /// to the 0..=255 range over the reconstructed minimum and maximum.
    pub fn decode(mut self) -> Result<DecodedImage> {
        let (marker, code) = self.read_marker()?;
        ensure!(marker == Marker::SOI, InvalidMarkerSnafu { marker: code });

        loop {
            let (marker, _code) = self.read_marker()?;
            match marker {
                Marker::SOF(sof) => self.parse_sof(sof)?,
                Marker::DHT => self.parse_dht()?,
                Marker::DRI => self.parse_dri()?,
                Marker::SOS => {
                    let scan = self.parse_sos()?;
                    return self.decode_scan(scan);
                }
                // the image ended with no scan to decode
                Marker::EOI => return UnexpectedEndOfDataSnafu.fail(),
                marker if marker.is_standalone() => {
                    tracing::debug!("Skipping standalone marker {:?}", marker);
                }
                marker => {
                    tracing::debug!("Skipping segment {:?}", marker);
                    self.skip_segment()?;
                }
            }
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = self
            .data
            .get(self.pos)
            .copied()
            .context(UnexpectedEndOfDataSnafu)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16> {
        ensure!(self.pos + 2 <= self.data.len(), UnexpectedEndOfDataSnafu);
        let value = BigEndian::read_u16(&self.data[self.pos..]);
        self.pos += 2;
        Ok(value)
    }

    fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        ensure!(
            self.pos + count <= self.data.len(),
            UnexpectedEndOfDataSnafu
        );
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    // Segment length is inclusive of its own two bytes;
    // the returned value is the remaining payload size.
    fn read_segment_length(&mut self) -> Result<usize> {
        let length = self.read_u16()?;
        ensure!(length >= 2, UnexpectedEndOfDataSnafu);
        Ok(usize::from(length) - 2)
    }

    fn read_marker(&mut self) -> Result<(Marker, u8)> {
        let byte = self.read_u8()?;
        ensure!(byte == 0xFF, InvalidMarkerSnafu { marker: byte });
        // runs of 0xFF are fill bytes before the marker code
        let mut code = self.read_u8()?;
        while code == 0xFF {
            code = self.read_u8()?;
        }
        let marker = Marker::from_u8(code).context(InvalidMarkerSnafu { marker: code })?;
        Ok((marker, code))
    }

    fn skip_segment(&mut self) -> Result<()> {
        let length = self.read_segment_length()?;
        self.read_bytes(length)?;
        Ok(())
    }

    fn parse_sof(&mut self, sof: u8) -> Result<()> {
        ensure!(
            self.frame.is_none(),
            InvalidFrameHeaderSnafu {
                reason: "duplicate frame header"
            }
        );
        match sof {
            // lossless, Huffman coded (non-differential and differential)
            3 | 7 => {}
            // lossless, arithmetic coded
            11 | 15 => return ArithmeticCodingNotSupportedSnafu.fail(),
            _ => return UnsupportedFormatSnafu { sof }.fail(),
        }

        let length = self.read_segment_length()?;
        ensure!(
            length >= 6,
            InvalidFrameHeaderSnafu {
                reason: "frame header too short"
            }
        );
        let precision = self.read_u8()?;
        ensure!(
            (2..=16).contains(&precision),
            InvalidFrameHeaderSnafu {
                reason: "unsupported sample precision"
            }
        );
        let height = self.read_u16()?;
        let width = self.read_u16()?;
        ensure!(
            height > 0 && width > 0,
            InvalidFrameHeaderSnafu {
                reason: "empty frame"
            }
        );
        let component_count = usize::from(self.read_u8()?);
        ensure!(
            (1..=4).contains(&component_count),
            InvalidFrameHeaderSnafu {
                reason: "bad component count"
            }
        );
        ensure!(
            length == 6 + 3 * component_count,
            InvalidFrameHeaderSnafu {
                reason: "frame header length mismatch"
            }
        );

        let mut components: Vec<FrameComponent> = Vec::with_capacity(component_count);
        for _ in 0..component_count {
            let id = self.read_u8()?;
            let sampling = self.read_u8()?;
            // quantization table selector; lossless has no quantization
            let _quantization_table = self.read_u8()?;
            ensure!(
                components.iter().all(|c| c.id != id),
                InvalidFrameHeaderSnafu {
                    reason: "duplicate component identifier"
                }
            );
            components.push(FrameComponent {
                id,
                horizontal_sampling: sampling >> 4,
                vertical_sampling: sampling & 0x0F,
                dc_table_index: 0,
            });
        }

        self.frame = Some(FrameInfo {
            precision,
            height,
            width,
            components,
        });
        Ok(())
    }

    fn parse_dht(&mut self) -> Result<()> {
        let mut remaining = self.read_segment_length()?;
        while remaining > 0 {
            ensure!(
                remaining >= 17,
                InvalidHuffmanTableSnafu {
                    reason: "truncated table definition"
                }
            );
            let table_info = self.read_u8()?;
            let class = table_info >> 4;
            let index = usize::from(table_info & 0x0F);
            ensure!(
                class <= 1,
                InvalidHuffmanTableSnafu {
                    reason: "bad table class"
                }
            );
            ensure!(
                index <= 3,
                InvalidHuffmanTableSnafu {
                    reason: "bad table destination"
                }
            );

            let mut code_counts = [0u8; 16];
            code_counts.copy_from_slice(self.read_bytes(16)?);
            let total: usize = code_counts.iter().map(|&c| usize::from(c)).sum();
            ensure!(
                remaining >= 17 + total,
                InvalidHuffmanTableSnafu {
                    reason: "truncated table values"
                }
            );
            let values = self.read_bytes(total)?.to_vec();
            let table = HuffmanTable::build(&code_counts, values)?;
            if class == 0 {
                self.dc_tables[index] = Some(table);
            } else {
                // AC tables have no use in a lossless scan
                tracing::debug!("Ignoring AC Huffman table {}", index);
            }
            remaining -= 17 + total;
        }
        Ok(())
    }

    fn parse_dri(&mut self) -> Result<()> {
        let length = self.read_segment_length()?;
        ensure!(
            length == 2,
            InvalidFrameHeaderSnafu {
                reason: "restart interval segment length mismatch"
            }
        );
        self.restart_interval = self.read_u16()?;
        Ok(())
    }

    fn parse_sos(&mut self) -> Result<ScanInfo> {
        let length = self.read_segment_length()?;
        let component_count = usize::from(self.read_u8()?);
        ensure!(
            length == 4 + 2 * component_count,
            InvalidScanHeaderSnafu {
                reason: "scan header length mismatch"
            }
        );
        let mut selections = Vec::with_capacity(component_count);
        for _ in 0..component_count {
            let selector = self.read_u8()?;
            let tables = self.read_u8()?;
            selections.push((selector, tables));
        }
        let predictor = self.read_u8()?;
        ensure!(
            predictor <= 7,
            InvalidScanHeaderSnafu {
                reason: "bad predictor selection"
            }
        );
        // spectral selection end, unused in lossless
        let _se = self.read_u8()?;
        let approximation = self.read_u8()?;
        let point_transform = approximation & 0x0F;

        let frame = self.frame.as_mut().context(InvalidScanHeaderSnafu {
            reason: "scan before frame header",
        })?;
        ensure!(
            component_count == frame.components.len(),
            InvalidScanHeaderSnafu {
                reason: "scan component count differs from frame"
            }
        );
        for (selector, tables) in selections {
            let dc_table_index = usize::from(tables >> 4);
            ensure!(
                dc_table_index <= 3,
                InvalidScanHeaderSnafu {
                    reason: "bad DC table selection"
                }
            );
            let component = frame
                .components
                .iter_mut()
                .find(|c| c.id == selector)
                .context(InvalidScanHeaderSnafu {
                    reason: "unknown component selector",
                })?;
            component.dc_table_index = dc_table_index;
        }

        Ok(ScanInfo {
            predictor,
            point_transform,
        })
    }

    fn decode_scan(mut self, scan: ScanInfo) -> Result<DecodedImage> {
        let frame = self.frame.take().context(InvalidScanHeaderSnafu {
            reason: "scan before frame header",
        })?;
        let mut tables = Vec::with_capacity(frame.components.len());
        for component in &frame.components {
            let table = self.dc_tables[component.dc_table_index].as_ref().context(
                InvalidScanHeaderSnafu {
                    reason: "scan selects an undefined Huffman table",
                },
            )?;
            tables.push(table);
        }

        if frame
            .components
            .iter()
            .any(|c| c.horizontal_sampling != 1 || c.vertical_sampling != 1)
        {
            tracing::warn!("Sub-sampled lossless components are treated as fully sampled");
        }

        let width = usize::from(frame.width);
        let height = usize::from(frame.height);
        let component_count = frame.components.len();
        let initial = initial_prediction(frame.precision, scan.point_transform);
        let restart_interval = usize::from(self.restart_interval);

        let mut samples = vec![0i32; width * height * component_count];
        let mut bits = BitReader::new(&self.data[self.pos..]);
        // one MCU is one pixel position across all components
        let mut positions_since_restart = 0usize;

        for y in 0..height {
            for x in 0..width {
                if restart_interval > 0 && positions_since_restart == restart_interval {
                    consume_restart_marker(&mut bits);
                    positions_since_restart = 0;
                }
                for (c, table) in tables.iter().enumerate() {
                    let category = table.decode(&mut bits)?;
                    let diff = decode_value(&mut bits, category)?;
                    let index = (y * width + x) * component_count + c;
                    let prediction = if x == 0 && y == 0 {
                        initial
                    } else if y == 0 {
                        samples[index - component_count]
                    } else if x == 0 {
                        samples[index - width * component_count]
                    } else {
                        predict(
                            scan.predictor,
                            samples[index - component_count],
                            samples[index - width * component_count],
                            samples[index - (width + 1) * component_count],
                        )
                    };
                    samples[index] = prediction.wrapping_add(diff);
                }
                positions_since_restart += 1;
            }
        }

        let data = if frame.precision <= 8 {
            samples.iter().map(|&s| s.clamp(0, 255) as u8).collect()
        } else {
            down_map_samples(&samples)
        };
        Ok(DecodedImage {
            data,
            width: frame.width,
            height: frame.height,
            channels: component_count as u8,
        })
    }
}

// Rescale reconstructed samples to 0..=255 over their actual range.
// A flat image maps to all zeros.
fn down_map_samples(samples: &[i32]) -> Vec<u8> {
    let min = samples.iter().copied().min().unwrap_or(0);
    let max = samples.iter().copied().max().unwrap_or(0);
    if min == max {
        return vec![0; samples.len()];
    }
    let range = i64::from(max) - i64::from(min);
    samples
        .iter()
        .map(|&s| {
            let scaled = (i64::from(s) - i64::from(min)) * 255 / range;
            scaled.clamp(0, 255) as u8
        })
        .collect()
}

// The prediction used for the very first sample of the scan,
// one half of the full dynamic range after the point transform.
fn initial_prediction(precision: u8, point_transform: u8) -> i32 {
    if precision > point_transform {
        1 << (precision - point_transform - 1)
    } else {
        0
    }
}

/// Apply one of the seven causal predictors to the neighborhood
/// (`ra` left, `rb` above, `rc` above-left).
fn predict(predictor: u8, ra: i32, rb: i32, rc: i32) -> i32 {
    match predictor {
        1 => ra,
        2 => rb,
        3 => rc,
        4 => ra + rb - rc,
        5 => ra + ((rb - rc) >> 1),
        6 => rb + ((ra - rc) >> 1),
        7 => (ra + rb) >> 1,
        // selection value 0 specifies no prediction
        _ => 0,
    }
}

// Read a difference value of the given magnitude category
// (ITU-T T.81, section H.1.2.1).
fn decode_value(bits: &mut BitReader<'_>, category: u8) -> Result<i32> {
    match category {
        0 => Ok(0),
        1..=16 => {
            let value = bits.read_bits(category)? as i32;
            if value >= 1 << (category - 1) {
                Ok(value)
            } else {
                Ok(value - (1 << category) + 1)
            }
        }
        ssss => InvalidCategorySnafu { ssss }.fail(),
    }
}

// Consume the restart marker expected at an interval boundary.
// Validation is lenient: a missing or mismatched marker is logged
// and decoding proceeds with whatever data follows.
fn consume_restart_marker(bits: &mut BitReader<'_>) {
    bits.align_to_byte();
    match (bits.peek_byte(), bits.peek_byte_at(1)) {
        (Some(0xFF), Some(code)) if (0xD0..=0xD7).contains(&code) => bits.skip_bytes(2),
        _ => tracing::debug!("Missing restart marker at interval boundary"),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_value, initial_prediction, predict, DecodedImage, LosslessDecoder};
    use crate::bitstream::BitReader;
    use crate::Error;
    use rstest::rstest;

    #[rstest]
    #[case(1, 100)]
    #[case(2, 200)]
    #[case(3, 50)]
    #[case(4, 250)]
    #[case(5, 175)]
    #[case(6, 225)]
    #[case(7, 150)]
    fn predictor_neighborhood(#[case] predictor: u8, #[case] expected: i32) {
        assert_eq!(predict(predictor, 100, 200, 50), expected);
    }

    #[test]
    fn initial_prediction_is_half_range() {
        assert_eq!(initial_prediction(8, 0), 128);
        assert_eq!(initial_prediction(16, 0), 32768);
        assert_eq!(initial_prediction(12, 0), 2048);
        assert_eq!(initial_prediction(8, 2), 32);
        // degenerate point transform
        assert_eq!(initial_prediction(4, 4), 0);
    }

    #[test]
    fn difference_values_extend_sign() {
        // category 3: raw 0b101 = 5 stays positive,
        // raw 0b010 = 2 maps to 2 - 7 = -5
        let mut bits = BitReader::new(&[0b1010_1000]);
        assert_eq!(decode_value(&mut bits, 3).unwrap(), 5);
        assert_eq!(decode_value(&mut bits, 3).unwrap(), -5);
        let mut bits = BitReader::new(&[]);
        assert_eq!(decode_value(&mut bits, 0).unwrap(), 0);
        assert!(matches!(
            decode_value(&mut bits, 17),
            Err(Error::InvalidCategory { ssss: 17 })
        ));
    }

    // -- a minimal lossless encoder, enough to exercise the decoder --

    struct BitWriter {
        bytes: Vec<u8>,
        current: u16,
        filled: u8,
    }

    impl BitWriter {
        fn new() -> Self {
            BitWriter {
                bytes: Vec::new(),
                current: 0,
                filled: 0,
            }
        }

        fn push_bits(&mut self, value: u32, count: u8) {
            for shift in (0..count).rev() {
                let bit = (value >> shift) & 1;
                self.current = (self.current << 1) | bit as u16;
                self.filled += 1;
                if self.filled == 8 {
                    self.flush_byte();
                }
            }
        }

        fn flush_byte(&mut self) {
            let byte = (self.current & 0xFF) as u8;
            self.bytes.push(byte);
            if byte == 0xFF {
                // stuff a zero so the data byte is not taken for a marker
                self.bytes.push(0x00);
            }
            self.current = 0;
            self.filled = 0;
        }

        fn align(&mut self) {
            while self.filled != 0 {
                self.push_bits(1, 1);
            }
        }

        fn finish(mut self) -> Vec<u8> {
            self.align();
            self.bytes
        }
    }

    fn magnitude_category(diff: i32) -> u8 {
        if diff == 0 {
            0
        } else {
            (32 - diff.unsigned_abs().leading_zeros()) as u8
        }
    }

    fn push_difference(writer: &mut BitWriter, category_code_len: u8, diff: i32) {
        let category = magnitude_category(diff);
        // the test Huffman table maps category c to code c
        writer.push_bits(u32::from(category), category_code_len);
        if category > 0 {
            let value = if diff < 0 {
                diff + (1 << category) - 1
            } else {
                diff
            };
            writer.push_bits(value as u32, category);
        }
    }

    struct TestStream {
        precision: u8,
        width: u16,
        height: u16,
        predictor: u8,
        restart_interval: u16,
        // one plane per component, in raster order
        planes: Vec<Vec<i32>>,
    }

    impl TestStream {
        // Encode with a trivial Huffman table in which
        // category c is the `code_len`-bit code with value c.
        fn encode(&self) -> Vec<u8> {
            let component_count = self.planes.len();
            let max_category = self.precision + 1;
            let code_len = 16 - u16::from(max_category).leading_zeros() as u8;

            let mut out = vec![0xFF, 0xD8];
            // DHT: class 0, destination 0
            let mut counts = [0u8; 16];
            counts[usize::from(code_len) - 1] = max_category + 1;
            out.extend_from_slice(&[0xFF, 0xC4]);
            out.extend_from_slice(&(2 + 1 + 16 + u16::from(max_category) + 1).to_be_bytes());
            out.push(0x00);
            out.extend_from_slice(&counts);
            out.extend((0..=max_category).collect::<Vec<u8>>());
            // SOF3
            out.extend_from_slice(&[0xFF, 0xC3]);
            out.extend_from_slice(&(8 + 3 * component_count as u16).to_be_bytes());
            out.push(self.precision);
            out.extend_from_slice(&self.height.to_be_bytes());
            out.extend_from_slice(&self.width.to_be_bytes());
            out.push(component_count as u8);
            for c in 0..component_count {
                out.extend_from_slice(&[c as u8 + 1, 0x11, 0x00]);
            }
            // DRI
            if self.restart_interval > 0 {
                out.extend_from_slice(&[0xFF, 0xDD, 0x00, 0x04]);
                out.extend_from_slice(&self.restart_interval.to_be_bytes());
            }
            // SOS
            out.extend_from_slice(&[0xFF, 0xDA]);
            out.extend_from_slice(&(6 + 2 * component_count as u16).to_be_bytes());
            out.push(component_count as u8);
            for c in 0..component_count {
                out.extend_from_slice(&[c as u8 + 1, 0x00]);
            }
            out.extend_from_slice(&[self.predictor, 0x00, 0x00]);

            out.extend_from_slice(&self.encode_entropy(code_len));
            out.extend_from_slice(&[0xFF, 0xD9]);
            out
        }

        fn encode_entropy(&self, code_len: u8) -> Vec<u8> {
            let width = usize::from(self.width);
            let height = usize::from(self.height);
            let initial = 1i32 << (self.precision - 1);
            let mut writer = BitWriter::new();
            let mut positions = 0u16;
            let mut restart_index = 0u8;
            for y in 0..height {
                for x in 0..width {
                    if self.restart_interval > 0 && positions == self.restart_interval {
                        writer.align();
                        writer.bytes.push(0xFF);
                        writer.bytes.push(0xD0 + restart_index);
                        restart_index = (restart_index + 1) % 8;
                        positions = 0;
                    }
                    for plane in &self.planes {
                        let index = y * width + x;
                        let prediction = if x == 0 && y == 0 {
                            initial
                        } else if y == 0 {
                            plane[index - 1]
                        } else if x == 0 {
                            plane[index - width]
                        } else {
                            predict(
                                self.predictor,
                                plane[index - 1],
                                plane[index - width],
                                plane[index - width - 1],
                            )
                        };
                        push_difference(&mut writer, code_len, plane[index] - prediction);
                    }
                    positions += 1;
                }
            }
            writer.finish()
        }
    }

    fn decode(stream: &TestStream) -> DecodedImage {
        let encoded = stream.encode();
        LosslessDecoder::new(&encoded).decode().unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(7)]
    fn round_trips_8_bit_grayscale(#[case] predictor: u8) {
        let plane: Vec<i32> = (0..32 * 32).map(|i| i * 7 % 256).collect();
        let stream = TestStream {
            precision: 8,
            width: 32,
            height: 32,
            predictor,
            restart_interval: 0,
            planes: vec![plane.clone()],
        };
        let image = decode(&stream);
        assert_eq!(image.width, 32);
        assert_eq!(image.height, 32);
        assert_eq!(image.channels, 1);
        assert_eq!(image.data.len(), 32 * 32);
        let expected: Vec<u8> = plane.iter().map(|&s| s as u8).collect();
        assert_eq!(image.data, expected);
    }

    #[test]
    fn round_trips_interleaved_components() {
        let red: Vec<i32> = (0..8 * 4).map(|i| i * 3 % 256).collect();
        let green: Vec<i32> = (0..8 * 4).map(|i| 255 - i * 5 % 256).collect();
        let blue: Vec<i32> = (0..8 * 4).map(|i| (i % 2) * 200).collect();
        let stream = TestStream {
            precision: 8,
            width: 8,
            height: 4,
            predictor: 1,
            restart_interval: 0,
            planes: vec![red.clone(), green.clone(), blue.clone()],
        };
        let image = decode(&stream);
        assert_eq!(image.channels, 3);
        assert_eq!(image.data.len(), 8 * 4 * 3);
        for i in 0..8 * 4 {
            assert_eq!(i32::from(image.data[i * 3]), red[i]);
            assert_eq!(i32::from(image.data[i * 3 + 1]), green[i]);
            assert_eq!(i32::from(image.data[i * 3 + 2]), blue[i]);
        }
    }

    #[test]
    fn honors_restart_intervals() {
        let plane: Vec<i32> = (0..16 * 16).map(|i| i % 251).collect();
        let stream = TestStream {
            precision: 8,
            width: 16,
            height: 16,
            predictor: 1,
            restart_interval: 16,
            planes: vec![plane.clone()],
        };
        let image = decode(&stream);
        let expected: Vec<u8> = plane.iter().map(|&s| s as u8).collect();
        assert_eq!(image.data, expected);
    }

    #[test]
    fn down_maps_high_precision_output() {
        let stream = TestStream {
            precision: 12,
            width: 2,
            height: 1,
            predictor: 1,
            restart_interval: 0,
            planes: vec![vec![1000, 3000]],
        };
        let image = decode(&stream);
        assert_eq!(image.data, vec![0, 255]);
    }

    #[test]
    fn down_maps_degenerate_range_to_zero() {
        let stream = TestStream {
            precision: 12,
            width: 2,
            height: 1,
            predictor: 1,
            restart_interval: 0,
            planes: vec![vec![500, 500]],
        };
        let image = decode(&stream);
        assert_eq!(image.data, vec![0, 0]);
    }

    #[test]
    fn rejects_baseline_frames() {
        let data = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01,
            0x11, 0x00];
        let err = LosslessDecoder::new(&data).decode().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { sof: 0 }));
    }

    #[test]
    fn rejects_arithmetic_lossless_frames() {
        let data = [0xFF, 0xD8, 0xFF, 0xCB, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01,
            0x11, 0x00];
        let err = LosslessDecoder::new(&data).decode().unwrap_err();
        assert!(matches!(err, Error::ArithmeticCodingNotSupported));
    }

    #[test]
    fn rejects_missing_soi() {
        let err = LosslessDecoder::new(&[0x00, 0x01]).decode().unwrap_err();
        assert!(matches!(err, Error::InvalidMarker { marker: 0x00 }));
    }

    #[test]
    fn premature_eoi_is_an_error() {
        let err = LosslessDecoder::new(&[0xFF, 0xD8, 0xFF, 0xD9])
            .decode()
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedEndOfData));
    }
}
