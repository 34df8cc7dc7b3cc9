use std::io::Read;

use flate2::read::ZlibDecoder;
use serde::Serialize;
use tracing::{debug, warn};

use crate::avm1::ActionRecord;
use crate::config::DecodeOptions;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::header::{Compression, Header, Prefix, PREFIX_LEN};
use crate::registry::Registries;
use crate::tag::TagRecord;
use crate::tag_stream::DecodeContext;

/// A fully decoded movie: header and top-level tag tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub header: Header,
    pub tags: Vec<TagRecord>,
}

impl Movie {
    /// Decode a movie held in memory.
    pub fn parse(data: &[u8], registries: &Registries, options: &DecodeOptions) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let prefix = read_prefix(&mut cursor)?;
        match prefix.compression {
            Compression::None => decode_body(prefix, cursor, registries, options),
            Compression::Zlib => {
                let body = &data[PREFIX_LEN as usize..];
                let cursor = Cursor::from_reader_at(ZlibDecoder::new(body), PREFIX_LEN);
                decode_body(prefix, cursor, registries, options)
            }
        }
    }

    /// Decode a movie from a stream. Compressed bodies are inflated on the
    /// fly; nothing beyond the decoded records is kept in memory.
    pub fn from_reader<R: Read>(
        mut reader: R,
        registries: &Registries,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let prefix = read_prefix(&mut Cursor::from_reader(&mut reader))?;

        // Offsets in the body stay relative to the decompressed file.
        let cursor = match prefix.compression {
            Compression::None => Cursor::from_reader_at(reader, PREFIX_LEN),
            Compression::Zlib => Cursor::from_reader_at(ZlibDecoder::new(reader), PREFIX_LEN),
        };
        decode_body(prefix, cursor, registries, options)
    }

    /// Every action record in the movie, depth-first through sprites, paired
    /// with the header of the tag that carries it.
    pub fn actions(&self) -> Vec<(&TagRecord, &ActionRecord)> {
        let mut out = Vec::new();
        collect_actions(&self.tags, &mut out);
        out
    }
}

fn read_prefix(cursor: &mut Cursor<'_>) -> Result<Prefix> {
    let prefix = Prefix::read(cursor)?;
    debug!(
        version = prefix.version,
        file_length = prefix.file_length,
        compression = ?prefix.compression,
        "read movie prefix"
    );
    Ok(prefix)
}

/// Header fields and top-level tag stream, with the cursor just past the prefix.
fn decode_body(
    prefix: Prefix,
    mut cursor: Cursor<'_>,
    registries: &Registries,
    options: &DecodeOptions,
) -> Result<Movie> {
    let header = Header::read_body(prefix, &mut cursor)?;
    let ctx = DecodeContext::new(registries, options);
    let tags = ctx.decode_tags(&mut cursor)?;

    let decoded = cursor.bytes_read();
    if decoded != header.file_length as u64 {
        warn!(
            declared = header.file_length,
            decoded, "file length does not match decoded length"
        );
    }

    Ok(Movie { header, tags })
}

fn collect_actions<'m>(tags: &'m [TagRecord], out: &mut Vec<(&'m TagRecord, &'m ActionRecord)>) {
    for record in tags {
        out.extend(record.tag.actions().iter().map(|a| (record, a)));
        collect_actions(record.tag.children(), out);
    }
}
