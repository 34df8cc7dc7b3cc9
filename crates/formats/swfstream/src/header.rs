use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Size of the uncompressed prefix: signature, version, file length.
pub const PREFIX_LEN: u64 = 8;

/// How the body following the 8-byte prefix is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compression {
    /// `FWS`
    None,
    /// `CWS`: zlib stream.
    Zlib,
}

impl Compression {
    pub fn from_signature(signature: [u8; 3]) -> Result<Self> {
        match &signature {
            b"FWS" => Ok(Self::None),
            b"CWS" => Ok(Self::Zlib),
            b"ZWS" => Err(Error::UnsupportedCompression { signature }),
            _ => Err(Error::InvalidSignature { found: signature }),
        }
    }
}

/// The uncompressed prefix of a movie file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prefix {
    pub compression: Compression,
    pub version: u8,
    /// Total file length once the body is decompressed, prefix included.
    pub file_length: u32,
}

impl Prefix {
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let signature = [cursor.read_u8()?, cursor.read_u8()?, cursor.read_u8()?];
        let compression = Compression::from_signature(signature)?;
        let version = cursor.read_u8()?;
        let file_length = cursor.read_u32()?;
        Ok(Self {
            compression,
            version,
            file_length,
        })
    }
}

/// Rectangle in twips (1/20 pixel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    /// 5-bit field width, then four signed fields of that width.
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let bits = cursor.read_bits(5)?;
        let x_min = cursor.read_sbits(bits)?;
        let x_max = cursor.read_sbits(bits)?;
        let y_min = cursor.read_sbits(bits)?;
        let y_max = cursor.read_sbits(bits)?;
        cursor.flush_to_byte_boundary();
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn width_px(&self) -> f64 {
        (self.x_max - self.x_min) as f64 / 20.0
    }

    pub fn height_px(&self) -> f64 {
        (self.y_max - self.y_min) as f64 / 20.0
    }
}

/// Movie header: prefix plus the fields opening the (decompressed) body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Header {
    pub compression: Compression,
    pub version: u8,
    pub file_length: u32,
    pub frame_size: Rect,
    /// 8.8 fixed point frames per second.
    pub frame_rate: u16,
    pub frame_count: u16,
}

impl Header {
    /// Read the body fields that follow `prefix`.
    pub fn read_body(prefix: Prefix, cursor: &mut Cursor<'_>) -> Result<Self> {
        let frame_size = Rect::read(cursor)?;
        let frame_rate = cursor.read_u16()?;
        let frame_count = cursor.read_u16()?;
        Ok(Self {
            compression: prefix.compression,
            version: prefix.version,
            file_length: prefix.file_length,
            frame_size,
            frame_rate,
            frame_count,
        })
    }

    pub fn frames_per_second(&self) -> f32 {
        self.frame_rate as f32 / 256.0
    }
}
