use crate::avm1::types::{ActionHeader, GetUrl2, Operand, SendVarsMethod};
use crate::cursor::Cursor;
use crate::error::Result;

pub fn load_goto_frame(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::GotoFrame(cursor.read_u16()?))
}

pub fn load_get_url(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let url = cursor.read_cstring()?;
    let target = cursor.read_cstring()?;
    Ok(Operand::GetUrl { url, target })
}

pub fn load_store_register(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::StoreRegister(cursor.read_u8()?))
}

pub fn load_wait_for_frame(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let frame = cursor.read_u16()?;
    let skip_count = cursor.read_u8()?;
    Ok(Operand::WaitForFrame { frame, skip_count })
}

pub fn load_wait_for_frame2(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::WaitForFrame2 {
        skip_count: cursor.read_u8()?,
    })
}

pub fn load_set_target(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::SetTarget(cursor.read_cstring()?))
}

pub fn load_goto_label(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::GotoLabel(cursor.read_cstring()?))
}

pub fn load_with(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::With {
        size: cursor.read_u16()?,
    })
}

pub fn load_jump(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::Jump(cursor.read_i16()?))
}

pub fn load_if(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::If(cursor.read_i16()?))
}

/// `method:2 reserved:4 load_target:1 load_variables:1`
pub fn load_get_url2(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let send_vars_method = SendVarsMethod::from_bits(cursor.read_bits(2)?);
    cursor.read_bits(4)?;
    let load_target = cursor.read_bit()?;
    let load_variables = cursor.read_bit()?;
    cursor.flush_to_byte_boundary();
    Ok(Operand::GetUrl2(GetUrl2 {
        send_vars_method,
        load_target,
        load_variables,
    }))
}

/// `reserved:6 scene_bias:1 play:1`, then a u16 bias when flagged.
pub fn load_goto_frame2(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    cursor.read_bits(6)?;
    let has_scene_bias = cursor.read_bit()?;
    let play = cursor.read_bit()?;
    cursor.flush_to_byte_boundary();
    let scene_bias = if has_scene_bias {
        Some(cursor.read_u16()?)
    } else {
        None
    };
    Ok(Operand::GotoFrame2 { play, scene_bias })
}
