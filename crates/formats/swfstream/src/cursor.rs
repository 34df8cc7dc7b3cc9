use std::io::{self, Read};

use crate::error::{Error, Result};

/// Sequential reader over a byte source. Multi-byte reads are little-endian,
/// bit reads are MSB-first.
///
/// The source may be a slice or any [`Read`] (a file, a zlib inflater), so a
/// movie never has to be resident in memory. The cursor only moves forward.
pub struct Cursor<'a> {
    src: Source<'a>,
    /// Bytes pulled from the source so far.
    pos: u64,
    /// Byte currently being consumed by bit reads.
    bit_buf: u8,
    /// Unread bits left in `bit_buf` (0 when byte-aligned).
    bits_left: u8,
}

/// Where the bytes come from. Slices skip by moving the slice start.
enum Source<'a> {
    Slice(&'a [u8]),
    Stream(Box<dyn Read + 'a>),
}

impl Read for Source<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Slice(data) => data.read(buf),
            Source::Stream(reader) => reader.read(buf),
        }
    }
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            src: Source::Slice(data),
            pos: 0,
            bit_buf: 0,
            bits_left: 0,
        }
    }

    /// Wrap a streamed source. Wrap unbuffered sources (files, sockets) in a
    /// `BufReader` first; string reads pull one byte at a time.
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self::from_reader_at(reader, 0)
    }

    /// Wrap a source whose first byte sits at logical offset `start`, so
    /// reported offsets stay relative to the enclosing file.
    pub fn from_reader_at(reader: impl Read + 'a, start: u64) -> Self {
        Self {
            src: Source::Stream(Box::new(reader)),
            pos: start,
            bit_buf: 0,
            bits_left: 0,
        }
    }

    /// Current byte offset. A partially consumed bit byte counts as read.
    pub fn bytes_read(&self) -> u64 {
        self.pos
    }

    /// Bit position within the current byte (0 when aligned).
    pub fn bit_offset(&self) -> u8 {
        (8 - self.bits_left) % 8
    }

    /// Discard what is left of a partially read byte.
    pub fn flush_to_byte_boundary(&mut self) {
        self.bits_left = 0;
    }

    /// Skip `n` bytes forward without materializing them.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        self.flush_to_byte_boundary();
        let offset = self.pos;
        let copied = match &mut self.src {
            Source::Slice(data) => {
                let slice: &'a [u8] = *data;
                let step = n.min(slice.len() as u64);
                *data = &slice[step as usize..];
                step
            }
            Source::Stream(reader) => io::copy(&mut reader.take(n), &mut io::sink())
                .map_err(|source| Error::Io { offset, source })?,
        };
        self.pos += copied;
        if copied < n {
            return Err(Error::BufferUnderflow {
                offset: self.pos,
                need: n - copied,
            });
        }
        Ok(())
    }

    /// Read `n` bytes into an owned buffer.
    pub fn read_bytes(&mut self, n: u64) -> Result<Vec<u8>> {
        self.flush_to_byte_boundary();
        let offset = self.pos;
        // Declared lengths come from untrusted input; let the buffer grow.
        let mut buf = Vec::with_capacity(n.min(64 * 1024) as usize);
        let copied = (&mut self.src)
            .take(n)
            .read_to_end(&mut buf)
            .map_err(|source| Error::Io { offset, source })? as u64;
        self.pos += copied;
        if copied < n {
            return Err(Error::BufferUnderflow {
                offset: self.pos,
                need: n - copied,
            });
        }
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a null-terminated string. The terminator is consumed but not
    /// returned. Invalid UTF-8 (pre-v6 movies use the system codepage) is
    /// replaced rather than rejected.
    pub fn read_cstring(&mut self) -> Result<String> {
        self.flush_to_byte_boundary();
        let mut bytes = Vec::new();
        loop {
            match self.read_u8()? {
                0 => break,
                b => bytes.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read `n` bits (0..=32) as an unsigned value.
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        if n > 32 {
            return Err(Error::InvalidBitWidth { bits: n });
        }
        let mut value: u64 = 0;
        let mut need = n;
        while need > 0 {
            if self.bits_left == 0 {
                self.bit_buf = self.read_array::<1>()?[0];
                self.bits_left = 8;
            }
            let take = need.min(self.bits_left as u32);
            let shift = self.bits_left as u32 - take;
            let mask = ((1u16 << take) - 1) as u8;
            value = (value << take) | ((self.bit_buf >> shift) & mask) as u64;
            self.bits_left -= take as u8;
            need -= take;
        }
        Ok(value as u32)
    }

    /// Read `n` bits (0..=32) as a two's-complement signed value.
    pub fn read_sbits(&mut self, n: u32) -> Result<i32> {
        let raw = self.read_bits(n)?;
        if n == 0 || n == 32 {
            return Ok(raw as i32);
        }
        let shift = 32 - n;
        Ok(((raw << shift) as i32) >> shift)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        // Byte reads never see stale bit state.
        if self.bits_left != 0 {
            self.flush_to_byte_boundary();
        }
        let mut buf = [0u8; N];
        let offset = self.pos;
        self.src.read_exact(&mut buf).map_err(|source| {
            if source.kind() == io::ErrorKind::UnexpectedEof {
                Error::BufferUnderflow {
                    offset,
                    need: N as u64,
                }
            } else {
                Error::Io { offset, source }
            }
        })?;
        self.pos += N as u64;
        Ok(buf)
    }
}

impl std::fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("bit_offset", &self.bit_offset())
            .finish()
    }
}
