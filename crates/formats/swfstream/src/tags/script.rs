use crate::cursor::Cursor;
use crate::error::Result;
use crate::tag::{DoAbc, InitAction, ScriptLimits, Tag, TagHeader};
use crate::tag_stream::DecodeContext;
use crate::tags::remaining;

pub fn load_do_action(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    Ok(Tag::DoAction(ctx.decode_actions(cursor)?))
}

pub fn load_do_init_action(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let sprite_id = cursor.read_u16()?;
    let actions = ctx.decode_actions(cursor)?;
    Ok(Tag::DoInitAction(InitAction { sprite_id, actions }))
}

/// Flag word and name, then the compiled block through the end of the tag.
pub fn load_do_abc(
    cursor: &mut Cursor<'_>,
    header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let flags = cursor.read_u32()?;
    let name = cursor.read_cstring()?;
    let data = cursor.read_bytes(remaining(cursor, header))?;
    Ok(Tag::DoAbc(DoAbc {
        flags: Some(flags),
        name: Some(name),
        data,
    }))
}

/// Earliest form of the compiled block: the whole payload, no flags or name.
pub fn load_do_abc_v1(
    cursor: &mut Cursor<'_>,
    header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let data = cursor.read_bytes(header.length as u64)?;
    Ok(Tag::DoAbc(DoAbc {
        flags: None,
        name: None,
        data,
    }))
}

pub fn load_script_limits(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    let max_recursion_depth = cursor.read_u16()?;
    let timeout_seconds = cursor.read_u16()?;
    Ok(Tag::ScriptLimits(ScriptLimits {
        max_recursion_depth,
        timeout_seconds,
    }))
}
