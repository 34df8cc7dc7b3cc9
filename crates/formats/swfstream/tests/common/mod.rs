#![allow(dead_code)]

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Builds tag streams byte by byte.
#[derive(Default)]
pub struct StreamBuilder {
    buf: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag, using the short header when the payload fits.
    pub fn tag(mut self, code: u16, payload: &[u8]) -> Self {
        if payload.len() < 0x3F {
            self.buf
                .extend_from_slice(&((code << 6) | payload.len() as u16).to_le_bytes());
            self.buf.extend_from_slice(payload);
            self
        } else {
            self.long_tag(code, payload)
        }
    }

    /// Append a tag with the extended 32-bit length field.
    pub fn long_tag(mut self, code: u16, payload: &[u8]) -> Self {
        self.buf.extend_from_slice(&((code << 6) | 0x3F).to_le_bytes());
        self.buf
            .extend_from_slice(&(payload.len() as i32).to_le_bytes());
        self.buf.extend_from_slice(payload);
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append the terminator and return the bytes.
    pub fn end(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(&[0, 0]);
        self.buf
    }
}

/// Sprite payload: id, frame count, nested stream (already terminated).
pub fn sprite(id: u16, frame_count: u16, nested: &[u8]) -> Vec<u8> {
    let mut out = id.to_le_bytes().to_vec();
    out.extend_from_slice(&frame_count.to_le_bytes());
    out.extend_from_slice(nested);
    out
}

/// Length-prefixed action: opcode, u16 length, operand.
pub fn action(opcode: u8, operand: &[u8]) -> Vec<u8> {
    let mut out = vec![opcode];
    out.extend_from_slice(&(operand.len() as u16).to_le_bytes());
    out.extend_from_slice(operand);
    out
}

/// 550×400 stage at 24 fps with `frame_count` frames.
pub fn body_header(frame_count: u16) -> Vec<u8> {
    let mut out = vec![0x78, 0x00, 0x05, 0x5F, 0x00, 0x00, 0x0F, 0xA0, 0x00];
    out.extend_from_slice(&(24u16 << 8).to_le_bytes());
    out.extend_from_slice(&frame_count.to_le_bytes());
    out
}

/// Wrap a body (header fields + tag stream) in an uncompressed envelope.
pub fn fws(version: u8, body: &[u8]) -> Vec<u8> {
    let mut out = b"FWS".to_vec();
    out.push(version);
    out.extend_from_slice(&(8 + body.len() as u32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// Wrap a body in a zlib-compressed envelope.
pub fn cws(version: u8, body: &[u8]) -> Vec<u8> {
    let mut out = b"CWS".to_vec();
    out.push(version);
    out.extend_from_slice(&(8 + body.len() as u32).to_le_bytes());
    let mut enc = ZlibEncoder::new(out, Compression::default());
    enc.write_all(body).unwrap();
    enc.finish().unwrap()
}
