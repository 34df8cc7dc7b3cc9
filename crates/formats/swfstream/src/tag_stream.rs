//! Tag stream decoding: the record loop shared by the movie body and every
//! nested container.

use tracing::{debug, trace};

use crate::avm1::ActionRecord;
use crate::config::DecodeOptions;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::registry::Registries;
use crate::tag::{TagHeader, TagRecord};

/// Short length value announcing an extended 32-bit length.
const LONG_LENGTH: u16 = 0x3F;

/// Everything a loader may need besides the cursor: the registries, the
/// decode options, and the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'r> {
    pub registries: &'r Registries,
    pub options: &'r DecodeOptions,
    depth: usize,
    extent: Option<Extent>,
}

/// Payload bounds of the innermost enclosing container.
#[derive(Debug, Clone, Copy)]
struct Extent {
    code: u16,
    start: u64,
    end: u64,
}

impl<'r> DecodeContext<'r> {
    pub fn new(registries: &'r Registries, options: &'r DecodeOptions) -> Self {
        Self {
            registries,
            options,
            depth: 0,
            extent: None,
        }
    }

    /// Nesting depth; 0 for the top-level stream.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the nested stream of the container tag `header`.
    ///
    /// The nested stream must fit inside the container's payload, and inside
    /// every container around it.
    pub fn nested(&self, header: &TagHeader) -> Result<Self> {
        let depth = self.depth + 1;
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return Err(Error::NestingTooDeep {
                    code: header.code,
                    offset: header.offset,
                    max_depth,
                });
            }
        }
        let own = Extent {
            code: header.code,
            start: header.data_offset(),
            end: header.end_offset(),
        };
        let extent = match self.extent {
            Some(outer) if outer.end < own.end => outer,
            _ => own,
        };
        Ok(Self {
            depth,
            extent: Some(extent),
            ..*self
        })
    }

    /// Decode the tag stream at the cursor until its terminator.
    pub fn decode_tags(&self, cursor: &mut Cursor<'_>) -> Result<Vec<TagRecord>> {
        decode_tags(cursor, self)
    }

    /// Decode the action stream at the cursor until its terminator.
    pub fn decode_actions(&self, cursor: &mut Cursor<'_>) -> Result<Vec<ActionRecord>> {
        crate::avm1::decode_actions(cursor, &self.registries.actions, self.options)
    }
}

/// Read one tag header. Returns `None` when the header is the terminator.
pub fn read_header(cursor: &mut Cursor<'_>) -> Result<Option<TagHeader>> {
    let offset = cursor.bytes_read();
    let word = cursor.read_u16()?;
    let code = word >> 6;
    let short_len = word & 0x3F;

    let (length, header_len) = if short_len == LONG_LENGTH {
        let length = cursor.read_i32()?;
        if length < 0 {
            return Err(Error::NegativeLength {
                code,
                offset,
                length,
            });
        }
        (length as u32, 6)
    } else {
        (short_len as u32, 2)
    };

    let header = TagHeader {
        code,
        length,
        offset,
        header_len,
    };

    if code == 0 {
        if length != 0 {
            return Err(Error::Structural {
                code,
                offset: header.data_offset(),
                declared: length as u64,
                consumed: 0,
            });
        }
        return Ok(None);
    }
    Ok(Some(header))
}

/// Read the next header of a nested stream, failing as soon as the header
/// would cross the end of the enclosing container.
fn read_nested_header(
    cursor: &mut Cursor<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<Option<TagHeader>> {
    if let Some(extent) = ctx.extent {
        let pos = cursor.bytes_read();
        if pos + 2 > extent.end {
            return Err(Error::Structural {
                code: extent.code,
                offset: extent.start,
                declared: extent.end - extent.start,
                consumed: pos.saturating_sub(extent.start),
            });
        }
    }
    read_header(cursor)
}

/// Decode tags until the terminator.
///
/// Tags without a loader are skipped by their declared length. A loader that
/// consumes a different number of bytes than declared aborts the stream.
pub fn decode_tags(cursor: &mut Cursor<'_>, ctx: &DecodeContext<'_>) -> Result<Vec<TagRecord>> {
    let mut records = Vec::new();

    while let Some(header) = read_nested_header(cursor, ctx)? {
        let start = cursor.bytes_read();

        let Some(loader) = ctx.registries.tags.get(header.code) else {
            debug!(
                code = header.code,
                offset = header.offset,
                length = header.length,
                "skipping tag without loader"
            );
            cursor.skip(header.length as u64)?;
            continue;
        };

        let tag = loader.load(cursor, &header, ctx)?;
        let consumed = cursor.bytes_read() - start;
        if consumed != header.length as u64 {
            return Err(Error::Structural {
                code: header.code,
                offset: start,
                declared: header.length as u64,
                consumed,
            });
        }

        trace!(
            code = header.code,
            offset = header.offset,
            depth = ctx.depth,
            tag = tag.name(),
            "decoded tag"
        );
        records.push(TagRecord { header, tag });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    fn header_word(code: u16, len: u16) -> [u8; 2] {
        ((code << 6) | len).to_le_bytes()
    }

    fn decode(data: &[u8]) -> Result<(Vec<TagRecord>, u64)> {
        let registries = Registries::standard()?;
        let options = DecodeOptions::default();
        let ctx = DecodeContext::new(&registries, &options);
        let mut c = Cursor::new(data);
        let tags = decode_tags(&mut c, &ctx)?;
        Ok((tags, c.bytes_read()))
    }

    #[test]
    fn terminator_only() {
        let (tags, end) = decode(&[0, 0]).unwrap();
        assert!(tags.is_empty());
        assert_eq!(end, 2);
    }

    #[test]
    fn terminator_with_length_is_structural() {
        let data = [header_word(0, 2).as_slice(), &[1, 2]].concat();
        assert!(matches!(
            decode(&data),
            Err(Error::Structural {
                code: 0,
                declared: 2,
                consumed: 0,
                ..
            })
        ));
    }

    #[test]
    fn long_header_is_read() {
        let mut data = header_word(1, 0x3F).to_vec();
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&[0, 0]);
        let (tags, end) = decode(&data).unwrap();
        assert_eq!(tags.len(), 1);
        assert!(tags[0].header.is_long());
        assert_eq!(tags[0].header.data_offset(), 6);
        assert_eq!(tags[0].tag, Tag::ShowFrame);
        assert_eq!(end, 8);
    }

    #[test]
    fn negative_long_length_rejected() {
        let mut data = header_word(45, 0x3F).to_vec();
        data.extend_from_slice(&(-1i32).to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(Error::NegativeLength {
                code: 45,
                length: -1,
                ..
            })
        ));
    }

    #[test]
    fn loader_underconsuming_is_structural() {
        // ShowFrame consumes nothing but declares two bytes.
        let data = [header_word(1, 2).as_slice(), &[0xAA, 0xBB], &[0, 0]].concat();
        match decode(&data) {
            Err(Error::Structural {
                code,
                offset,
                declared,
                consumed,
            }) => {
                assert_eq!(code, 1);
                assert_eq!(offset, 2);
                assert_eq!(declared, 2);
                assert_eq!(consumed, 0);
            }
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn missing_terminator_underflows() {
        let data = header_word(1, 0);
        assert!(matches!(
            decode(&data),
            Err(Error::BufferUnderflow { offset: 2, .. })
        ));
    }

    #[test]
    fn nesting_limit() {
        // Sprite inside a sprite, limit of one level.
        let inner = [header_word(39, 6).as_slice(), &[2, 0, 1, 0], &[0, 0]].concat();
        let mut outer_body = vec![1, 0, 1, 0];
        outer_body.extend_from_slice(&inner);
        outer_body.extend_from_slice(&[0, 0]);
        let mut data = header_word(39, outer_body.len() as u16).to_vec();
        data.extend_from_slice(&outer_body);
        data.extend_from_slice(&[0, 0]);

        let registries = Registries::standard().unwrap();
        let options = DecodeOptions {
            max_depth: Some(1),
            ..DecodeOptions::default()
        };
        let ctx = DecodeContext::new(&registries, &options);
        let err = decode_tags(&mut Cursor::new(&data), &ctx).unwrap_err();
        assert!(matches!(
            err,
            Error::NestingTooDeep {
                code: 39,
                max_depth: 1,
                ..
            }
        ));

        let (tags, _) = decode(&data).unwrap();
        assert_eq!(tags[0].tag.children()[0].tag.children().len(), 0);
    }

    #[test]
    fn nested_stream_cannot_start_past_container() {
        // Zero-length sprite whose id and frame count already overrun it.
        let data = [header_word(39, 0).as_slice(), &[1, 0, 1, 0], &[0, 0], &[0, 0]].concat();
        match decode(&data) {
            Err(Error::Structural {
                code,
                offset,
                declared,
                consumed,
            }) => {
                assert_eq!(code, 39);
                assert_eq!(offset, 2);
                assert_eq!(declared, 0);
                assert_eq!(consumed, 4);
            }
            other => panic!("expected structural error, got {other:?}"),
        }
    }

    #[test]
    fn inner_container_is_bounded_by_outer() {
        // The inner sprite claims 1000 bytes but the outer one ends after
        // the inner's first ShowFrame.
        let mut outer_body = vec![1, 0, 1, 0];
        outer_body.extend_from_slice(&header_word(39, 0x3F));
        outer_body.extend_from_slice(&1000i32.to_le_bytes());
        outer_body.extend_from_slice(&[2, 0, 1, 0]);
        outer_body.extend_from_slice(&header_word(1, 0));
        let mut data = header_word(39, outer_body.len() as u16).to_vec();
        data.extend_from_slice(&outer_body);
        for _ in 0..3 {
            data.extend_from_slice(&header_word(1, 0));
        }
        data.extend_from_slice(&[0, 0, 0, 0]);

        match decode(&data) {
            Err(Error::Structural {
                code,
                offset,
                declared,
                consumed,
            }) => {
                assert_eq!(code, 39);
                assert_eq!(offset, 2);
                assert_eq!(declared, 16);
                assert_eq!(consumed, 16);
            }
            other => panic!("expected structural error, got {other:?}"),
        }
    }
}
