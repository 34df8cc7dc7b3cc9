//! AVM1 action bytecode: opcode table, operand model, stream decoder, and
//! the built-in operand loaders.

pub mod control;
pub mod decode;
pub mod function;
pub mod opcode;
pub mod push;
pub mod types;

pub use decode::decode_actions;
pub use opcode::Opcode;
pub use types::{
    ActionHeader, ActionRecord, BlockRange, CatchTarget, DefineFunction, DefineFunction2,
    FunctionFlags, FunctionParam, GetUrl2, Operand, SendVarsMethod, TryBlock, Value,
};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::registry::ActionRegistryBuilder;

/// Register every built-in action loader.
pub fn register_builtin(registry: &mut ActionRegistryBuilder) -> Result<()> {
    // Every standard opcode below 0x80 is operand-free.
    for code in 0x01..0x80u8 {
        if Opcode::from_u8(code).is_some() {
            registry.register(code, load_none)?;
        }
    }

    registry
        .register(Opcode::GotoFrame as u8, control::load_goto_frame)?
        .register(Opcode::GetUrl as u8, control::load_get_url)?
        .register(Opcode::StoreRegister as u8, control::load_store_register)?
        .register(Opcode::ConstantPool as u8, push::load_constant_pool)?
        .register(Opcode::WaitForFrame as u8, control::load_wait_for_frame)?
        .register(Opcode::SetTarget as u8, control::load_set_target)?
        .register(Opcode::GotoLabel as u8, control::load_goto_label)?
        .register(Opcode::WaitForFrame2 as u8, control::load_wait_for_frame2)?
        .register(Opcode::DefineFunction2 as u8, function::load_define_function2)?
        .register(Opcode::Try as u8, function::load_try)?
        .register(Opcode::With as u8, control::load_with)?
        .register(Opcode::Push as u8, push::load_push)?
        .register(Opcode::Jump as u8, control::load_jump)?
        .register(Opcode::GetUrl2 as u8, control::load_get_url2)?
        .register(Opcode::DefineFunction as u8, function::load_define_function)?
        .register(Opcode::If as u8, control::load_if)?
        .register(Opcode::Call as u8, load_none)?
        .register(Opcode::GotoFrame2 as u8, control::load_goto_frame2)?;
    Ok(())
}

/// Loader for opcodes without operand fields.
pub fn load_none(_cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::None)
}

/// Loader that keeps the declared operand bytes undecoded. Useful when
/// registering vendor opcodes whose layout is unknown.
pub fn load_opaque(cursor: &mut Cursor<'_>, header: &ActionHeader) -> Result<Operand> {
    Ok(Operand::Opaque(cursor.read_bytes(header.length as u64)?))
}
