use crate::cursor::Cursor;
use crate::error::Result;
use crate::tag::{FrameLabel, Rgb, Tag, TagHeader};
use crate::tag_stream::DecodeContext;
use crate::tags::remaining;

pub fn load_show_frame(
    _cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    Ok(Tag::ShowFrame)
}

pub fn load_background_color(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let r = cursor.read_u8()?;
    let g = cursor.read_u8()?;
    let b = cursor.read_u8()?;
    Ok(Tag::SetBackgroundColor(Rgb { r, g, b }))
}

/// Frame label name, followed in v6+ movies by a one-byte anchor flag.
pub fn load_frame_label(
    cursor: &mut Cursor<'_>,
    header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let name = cursor.read_cstring()?;
    let is_anchor = if remaining(cursor, header) > 0 {
        cursor.read_u8()? != 0
    } else {
        false
    };
    Ok(Tag::FrameLabel(FrameLabel { name, is_anchor }))
}
