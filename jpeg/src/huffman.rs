//! Huffman table construction and symbol decoding.
//!
//! Decoding walks the code one bit at a time against the canonical
//! `min_code`/`max_code`/`val_offset` triple. The deliberately simple
//! path keeps the decoder auditable; lossless scans decode one symbol
//! per sample, so there is no inner-loop table to amortize.

use snafu::{ensure, OptionExt};

use crate::bitstream::BitReader;
use crate::{InvalidHuffmanCodeSnafu, InvalidHuffmanTableSnafu, Result};

/// A canonical Huffman table, as defined by one DHT segment entry.
#[derive(Debug, Clone)]
pub struct HuffmanTable {
    values: Vec<u8>,
    // indexed by code length 1..=16; length 0 is unused
    min_code: [i32; 17],
    max_code: [i32; 17],
    val_offset: [i32; 17],
}

impl HuffmanTable {
    /// Build a table from the 16 per-length code counts
    /// and the symbol values in code order.
    pub fn build(code_counts: &[u8; 16], values: Vec<u8>) -> Result<Self> {
        let total: usize = code_counts.iter().map(|&c| usize::from(c)).sum();
        ensure!(
            total <= 256,
            InvalidHuffmanTableSnafu {
                reason: "more than 256 codes"
            }
        );
        ensure!(
            total == values.len(),
            InvalidHuffmanTableSnafu {
                reason: "code counts do not match the number of values"
            }
        );

        let mut min_code = [0i32; 17];
        let mut max_code = [-1i32; 17];
        let mut val_offset = [0i32; 17];
        let mut code: i32 = 0;
        let mut val_index: i32 = 0;
        for length in 1..=16usize {
            let count = i32::from(code_counts[length - 1]);
            if count > 0 {
                min_code[length] = code;
                val_offset[length] = val_index - code;
                val_index += count;
                code += count;
                max_code[length] = code - 1;
                // all codes of this length must fit in `length` bits
                ensure!(
                    max_code[length] < (1 << length),
                    InvalidHuffmanTableSnafu {
                        reason: "code counts overflow the code space"
                    }
                );
            }
            code <<= 1;
        }

        Ok(HuffmanTable {
            values,
            min_code,
            max_code,
            val_offset,
        })
    }

    /// Decode one symbol from the entropy-coded segment.
    pub fn decode(&self, bits: &mut BitReader<'_>) -> Result<u8> {
        let mut code: i32 = 0;
        for length in 1..=16usize {
            code = (code << 1) | self.read_code_bit(bits)?;
            if self.max_code[length] >= 0 && code >= self.min_code[length]
                && code <= self.max_code[length]
            {
                let index = (code + self.val_offset[length]) as usize;
                return self
                    .values
                    .get(index)
                    .copied()
                    .context(InvalidHuffmanCodeSnafu);
            }
        }
        InvalidHuffmanCodeSnafu.fail()
    }

    fn read_code_bit(&self, bits: &mut BitReader<'_>) -> Result<i32> {
        Ok(bits.read_bits(1)? as i32)
    }
}
