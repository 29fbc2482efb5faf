//! A typed cursor over in-memory DICOM data.
//!
//! Element values are never copied at parse time;
//! readers hand out borrowed views into the original buffer,
//! so parsed indexes are bound to the buffer's lifetime.

use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use snafu::{ensure, Snafu};

/// Error from reading past the boundaries of the underlying buffer.
#[derive(Debug, Snafu)]
pub enum Error {
    /// The operation would cross the end of the data.
    #[snafu(display("Unexpected end of data at position {}", position))]
    UnexpectedEndOfData {
        /// the cursor position at the time of the attempted read
        position: usize,
    },
}

/// Result alias for byte source operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A non-copying cursor over an immutable byte slice,
/// reading multi-byte integers in a fixed endianness.
#[derive(Debug, Clone)]
pub struct ByteSource<'a> {
    data: &'a [u8],
    pos: usize,
    endianness: Endianness,
}

impl<'a> ByteSource<'a> {
    /// Create a new byte source over the given data.
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        ByteSource {
            data,
            pos: 0,
            endianness,
        }
    }

    /// Create a new little endian byte source over the given data.
    pub fn little_endian(data: &'a [u8]) -> Self {
        ByteSource::new(data, Endianness::Little)
    }

    /// The endianness in which multi-byte integers are read.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The current cursor position, as an absolute offset into the data.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bytes between the cursor and the end of the data.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor is at the end of the data.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Move the cursor to an absolute position,
    /// backward or forward, within `0..=len`.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        ensure!(pos <= self.data.len(), UnexpectedEndOfDataSnafu {
            position: pos
        });
        self.pos = pos;
        Ok(())
    }

    /// Advance the cursor by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Read the next `n` bytes as a borrowed view.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Read the next byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.take(1).map(|b| b[0])
    }

    /// Read the next 2 bytes as an unsigned integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(match self.endianness {
            Endianness::Little => LittleEndian::read_u16(bytes),
            Endianness::Big => BigEndian::read_u16(bytes),
        })
    }

    /// Read the next 4 bytes as an unsigned integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(match self.endianness {
            Endianness::Little => LittleEndian::read_u32(bytes),
            Endianness::Big => BigEndian::read_u32(bytes),
        })
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        ensure!(n <= self.remaining(), UnexpectedEndOfDataSnafu {
            position: self.pos
        });
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}
