use crate::avm1::types::{
    ActionHeader, BlockRange, CatchTarget, DefineFunction, DefineFunction2, FunctionFlags,
    FunctionParam, Operand, TryBlock,
};
use crate::cursor::Cursor;
use crate::error::Result;

/// Name, u16 parameter count, parameter names, u16 body size.
pub fn load_define_function(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let name = cursor.read_cstring()?;
    let param_count = cursor.read_u16()?;
    let mut params = Vec::with_capacity(param_count as usize);
    for _ in 0..param_count {
        params.push(cursor.read_cstring()?);
    }
    let code_size = cursor.read_u16()?;
    Ok(Operand::DefineFunction(Box::new(DefineFunction {
        name,
        params,
        code_size,
    })))
}

/// Name, u16 parameter count, u8 register count, 16 bits of flags, then
/// (register, name) per parameter and a u16 body size.
pub fn load_define_function2(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let name = cursor.read_cstring()?;
    let param_count = cursor.read_u16()?;
    let register_count = cursor.read_u8()?;

    let preload_parent = cursor.read_bit()?;
    let preload_root = cursor.read_bit()?;
    let suppress_super = cursor.read_bit()?;
    let preload_super = cursor.read_bit()?;
    let suppress_arguments = cursor.read_bit()?;
    let preload_arguments = cursor.read_bit()?;
    let suppress_this = cursor.read_bit()?;
    let preload_this = cursor.read_bit()?;
    cursor.read_bits(7)?;
    let preload_global = cursor.read_bit()?;
    cursor.flush_to_byte_boundary();

    let mut params = Vec::with_capacity(param_count as usize);
    for _ in 0..param_count {
        let register = cursor.read_u8()?;
        let name = cursor.read_cstring()?;
        params.push(FunctionParam { register, name });
    }
    let code_size = cursor.read_u16()?;

    Ok(Operand::DefineFunction2(Box::new(DefineFunction2 {
        name,
        register_count,
        flags: FunctionFlags {
            preload_parent,
            preload_root,
            suppress_super,
            preload_super,
            suppress_arguments,
            preload_arguments,
            suppress_this,
            preload_this,
            preload_global,
        },
        params,
        code_size,
    })))
}

/// Exception construct. The try, catch and finally blocks follow the operand
/// and are skipped here; their extents are kept for callers that want them.
pub fn load_try(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    cursor.read_bits(5)?;
    let catch_in_register = cursor.read_bit()?;
    let has_finally = cursor.read_bit()?;
    let has_catch = cursor.read_bit()?;
    cursor.flush_to_byte_boundary();

    let try_size = cursor.read_u16()?;
    let catch_size = cursor.read_u16()?;
    let finally_size = cursor.read_u16()?;
    let catch_target = if catch_in_register {
        CatchTarget::Register(cursor.read_u8()?)
    } else {
        CatchTarget::Variable(cursor.read_cstring()?)
    };

    let try_block = skip_block(cursor, try_size)?;
    let catch_block = skip_block(cursor, catch_size)?;
    let finally_block = skip_block(cursor, finally_size)?;

    Ok(Operand::Try(Box::new(TryBlock {
        has_catch,
        has_finally,
        catch_target,
        try_block,
        catch_block,
        finally_block,
    })))
}

fn skip_block(cursor: &mut Cursor<'_>, size: u16) -> Result<BlockRange> {
    let offset = cursor.bytes_read();
    cursor.skip(size as u64)?;
    Ok(BlockRange {
        offset,
        len: size as u64,
    })
}
