//! Negotiated frame format and the pixel format table.

/// Media bus pixel codes understood by the receiver
pub mod media_bus {
    /// RGB888, one 24-bit sample per pixel
    pub const RGB888_1X24: u32 = 0x100a;
    /// 8-bit luma only
    pub const Y8_1X8: u32 = 0x2001;
    /// UYVY 4:2:2, two 8-bit samples per pixel
    pub const UYVY8_2X8: u32 = 0x2006;
    /// 10-bit luma only
    pub const Y10_1X10: u32 = 0x200a;
    /// YUYV 4:2:2, two 10-bit samples per pixel
    pub const YUYV10_2X10: u32 = 0x200b;
    /// UYVY 4:2:2, one 16-bit sample per pixel
    pub const UYVY8_1X16: u32 = 0x200f;
    /// YUYV 4:2:2, one 16-bit sample per pixel
    pub const YUYV8_1X16: u32 = 0x2011;
    /// 8-bit Bayer BGGR
    pub const SBGGR8_1X8: u32 = 0x3001;
    /// 8-bit Bayer GRBG
    pub const SGRBG8_1X8: u32 = 0x3002;
    /// 8-bit Bayer GBRG
    pub const SGBRG8_1X8: u32 = 0x3013;
    /// 8-bit Bayer RGGB
    pub const SRGGB8_1X8: u32 = 0x3014;
}

/// CSI-2 data type and sample width for one pixel code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatInfo {
    /// Media bus code
    pub code: u32,
    /// CSI-2 packet data type
    pub datatype: u8,
    /// Bits per pixel on the wire
    pub bpp: u8,
}

const fn info(code: u32, datatype: u8, bpp: u8) -> FormatInfo {
    FormatInfo {
        code,
        datatype,
        bpp,
    }
}

/// Supported formats; the first entry is the fallback for unknown codes
pub static FORMATS: [FormatInfo; 11] = [
    info(media_bus::RGB888_1X24, 0x24, 24),
    info(media_bus::UYVY8_1X16, 0x1e, 16),
    info(media_bus::YUYV8_1X16, 0x1e, 16),
    info(media_bus::UYVY8_2X8, 0x1e, 16),
    info(media_bus::YUYV10_2X10, 0x1e, 20),
    info(media_bus::Y10_1X10, 0x2b, 10),
    info(media_bus::SBGGR8_1X8, 0x2a, 8),
    info(media_bus::SGBRG8_1X8, 0x2a, 8),
    info(media_bus::SGRBG8_1X8, 0x2a, 8),
    info(media_bus::SRGGB8_1X8, 0x2a, 8),
    info(media_bus::Y8_1X8, 0x2a, 8),
];

/// Look up a media bus code
pub fn format_info(code: u32) -> Option<&'static FormatInfo> {
    FORMATS.iter().find(|f| f.code == code)
}

/// Field order of the incoming frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    /// Progressive frames
    #[default]
    None,
    /// Alternating top and bottom fields, one field per frame
    Alternate,
    /// Both fields interleaved in one frame
    Interlaced,
}

/// Negotiated format on the receiver's sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameFormat {
    /// Media bus code
    pub code: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in lines (per field when alternating)
    pub height: u32,
    /// Field order
    pub field: Field,
}

impl Default for FrameFormat {
    fn default() -> Self {
        Self {
            code: media_bus::UYVY8_1X16,
            width: 1920,
            height: 1080,
            field: Field::None,
        }
    }
}

impl FrameFormat {
    /// Create a progressive format
    pub const fn new(code: u32, width: u32, height: u32) -> Self {
        Self {
            code,
            width,
            height,
            field: Field::None,
        }
    }

    /// Set the field order
    #[must_use]
    pub const fn with_field(mut self, field: Field) -> Self {
        self.field = field;
        self
    }

    /// Replace an unsupported code with the first table entry
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if format_info(self.code).is_none() {
            self.code = FORMATS[0].code;
        }
        self
    }
}
