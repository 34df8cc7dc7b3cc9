use crate::cursor::Cursor;
use crate::error::Result;
use crate::tag::{Sprite, Tag, TagHeader};
use crate::tag_stream::DecodeContext;

/// Sprite id and frame count, then a complete nested tag stream.
///
/// The nested stream runs on the same cursor and ends at its own terminator,
/// so the outer stream resumes right after it.
pub fn load_define_sprite(
    cursor: &mut Cursor<'_>,
    header: &TagHeader,
    ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let id = cursor.read_u16()?;
    let frame_count = cursor.read_u16()?;
    let tags = ctx.nested(header)?.decode_tags(cursor)?;
    Ok(Tag::DefineSprite(Sprite {
        id,
        frame_count,
        tags,
    }))
}
