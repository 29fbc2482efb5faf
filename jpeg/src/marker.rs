//! JPEG marker codes.

/// A JPEG marker, identified by the byte following `0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// For temporary private use in arithmetic coding
    TEM,
    /// Start of frame, with the frame type (0 through 15)
    SOF(u8),
    /// Define Huffman table(s)
    DHT,
    /// Define arithmetic coding conditioning(s)
    DAC,
    /// Restart with modulo 8 count
    RST(u8),
    /// Start of image
    SOI,
    /// End of image
    EOI,
    /// Start of scan
    SOS,
    /// Define quantization table(s)
    DQT,
    /// Define number of lines
    DNL,
    /// Define restart interval
    DRI,
    /// Define hierarchical progression
    DHP,
    /// Expand reference component(s)
    EXP,
    /// Reserved for JPEG extensions
    JPG,
    /// Reserved for application segments, 0 through 15
    APP(u8),
    /// Reserved for JPEG extensions, 0 through 13
    JPGn(u8),
    /// Comment
    COM,
}

impl Marker {
    /// Interpret a marker code byte.
    /// Returns `None` for `0x00` and `0xFF`,
    /// which never terminate a marker.
    pub fn from_u8(value: u8) -> Option<Marker> {
        use Marker::*;
        match value {
            0x00 | 0xFF => None,
            0x01 => Some(TEM),
            0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => Some(SOF(value - 0xC0)),
            0xC4 => Some(DHT),
            0xC8 => Some(JPG),
            0xCC => Some(DAC),
            0xD0..=0xD7 => Some(RST(value - 0xD0)),
            0xD8 => Some(SOI),
            0xD9 => Some(EOI),
            0xDA => Some(SOS),
            0xDB => Some(DQT),
            0xDC => Some(DNL),
            0xDD => Some(DRI),
            0xDE => Some(DHP),
            0xDF => Some(EXP),
            0xE0..=0xEF => Some(APP(value - 0xE0)),
            0xF0..=0xFD => Some(JPGn(value - 0xF0)),
            0xFE => Some(COM),
            _ => None,
        }
    }

    /// Whether this marker stands alone,
    /// with no segment length field after it.
    pub fn is_standalone(self) -> bool {
        matches!(
            self,
            Marker::TEM | Marker::RST(_) | Marker::SOI | Marker::EOI
        )
    }
}
