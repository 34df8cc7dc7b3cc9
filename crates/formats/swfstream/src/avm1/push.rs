use crate::avm1::types::{ActionHeader, Operand, Value};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Read typed literals until the declared operand length is used up.
pub fn load_push(cursor: &mut Cursor<'_>, header: &ActionHeader) -> Result<Operand> {
    let end = cursor.bytes_read() + header.length as u64;
    let mut values = Vec::new();
    while cursor.bytes_read() < end {
        values.push(read_value(cursor)?);
    }
    Ok(Operand::Push(values))
}

/// Read one type byte and the single value it selects.
pub fn read_value(cursor: &mut Cursor<'_>) -> Result<Value> {
    let offset = cursor.bytes_read();
    let value = match cursor.read_u8()? {
        Value::STRING => Value::String(cursor.read_cstring()?),
        Value::FLOAT => Value::Float(cursor.read_f32()?),
        Value::NULL => Value::Null,
        Value::UNDEFINED => Value::Undefined,
        Value::REGISTER => Value::Register(cursor.read_u8()?),
        Value::BOOL => Value::Bool(cursor.read_u8()? != 0),
        Value::DOUBLE => Value::Double(cursor.read_f64()?),
        Value::INT => Value::Int(cursor.read_i32()?),
        Value::CONSTANT8 => Value::Constant(cursor.read_u8()? as u16),
        Value::CONSTANT16 => Value::Constant(cursor.read_u16()?),
        type_id => return Err(Error::InvalidPushType { type_id, offset }),
    };
    Ok(value)
}

/// u16 count, then count null-terminated strings.
pub fn load_constant_pool(cursor: &mut Cursor<'_>, _header: &ActionHeader) -> Result<Operand> {
    let count = cursor.read_u16()?;
    let mut pool = Vec::with_capacity(count as usize);
    for _ in 0..count {
        pool.push(cursor.read_cstring()?);
    }
    Ok(Operand::ConstantPool(pool))
}
