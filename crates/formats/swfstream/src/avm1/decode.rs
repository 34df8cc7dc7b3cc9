use tracing::trace;

use crate::avm1::opcode::has_length;
use crate::avm1::types::{ActionHeader, ActionRecord};
use crate::config::DecodeOptions;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::registry::ActionRegistry;

/// Decode actions until the 0x00 terminator.
///
/// Opcodes at or above 0x80 carry a 16-bit operand length. An opcode with no
/// registered loader is fatal: without a loader the operand layout is unknown.
pub fn decode_actions(
    cursor: &mut Cursor<'_>,
    registry: &ActionRegistry,
    options: &DecodeOptions,
) -> Result<Vec<ActionRecord>> {
    let mut actions = Vec::new();

    loop {
        let offset = cursor.bytes_read();
        let opcode = cursor.read_u8()?;
        if opcode == 0 {
            break;
        }
        let length = if has_length(opcode) { cursor.read_u16()? } else { 0 };
        let header = ActionHeader {
            opcode,
            length,
            offset,
        };

        let loader = registry
            .get(opcode)
            .ok_or(Error::UnknownOpcode { opcode, offset })?;
        let start = cursor.bytes_read();
        let operand = loader.load(cursor, &header)?;

        if options.strict_action_lengths && has_length(opcode) {
            let consumed = (cursor.bytes_read() - start).saturating_sub(operand.trailing_len());
            if consumed != length as u64 {
                return Err(Error::ActionLength {
                    opcode,
                    offset,
                    declared: length,
                    consumed,
                });
            }
        }

        trace!(opcode, offset, length, "decoded action");
        actions.push(ActionRecord {
            offset,
            opcode,
            length,
            operand,
        });
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avm1::types::{Operand, Value};
    use crate::avm1::Opcode;
    use crate::registry::Registries;

    fn decode(data: &[u8], options: &DecodeOptions) -> Result<Vec<ActionRecord>> {
        let registries = Registries::standard()?;
        decode_actions(&mut Cursor::new(data), &registries.actions, options)
    }

    #[test]
    fn zero_operand_then_terminator() {
        let actions = decode(&[0x14, 0x00], &DecodeOptions::default()).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].opcode, 0x14);
        assert_eq!(actions[0].name(), Some(Opcode::StringLength));
        assert_eq!(actions[0].length, 0);
        assert_eq!(actions[0].operand, Operand::None);
    }

    #[test]
    fn offsets_track_each_record() {
        // Play; GotoFrame 3; Stop
        let data = [0x06, 0x81, 0x02, 0x00, 0x03, 0x00, 0x07, 0x00];
        let actions = decode(&data, &DecodeOptions::default()).unwrap();
        let offsets: Vec<u64> = actions.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, [0, 1, 6]);
        assert_eq!(actions[1].operand, Operand::GotoFrame(3));
    }

    #[test]
    fn unknown_opcode_is_fatal() {
        let data = [0x06, 0x16, 0x00];
        match decode(&data, &DecodeOptions::default()) {
            Err(Error::UnknownOpcode { opcode, offset }) => {
                assert_eq!(opcode, 0x16);
                assert_eq!(offset, 1);
            }
            other => panic!("expected unknown opcode, got {other:?}"),
        }
    }

    #[test]
    fn unknown_long_opcode_reports_opcode_offset() {
        let data = [0xF7, 0x01, 0x00, 0xAA, 0x00];
        assert!(matches!(
            decode(&data, &DecodeOptions::default()),
            Err(Error::UnknownOpcode {
                opcode: 0xF7,
                offset: 0
            })
        ));
    }

    #[test]
    fn declared_length_mismatch_is_checked_when_strict() {
        // StoreRegister declares 2 bytes but its operand is 1 byte; the stray
        // byte 0x07 is then read as Stop.
        let data = [0x87, 0x02, 0x00, 0x01, 0x07, 0x00];
        match decode(&data, &DecodeOptions::default()) {
            Err(Error::ActionLength {
                opcode,
                offset,
                declared,
                consumed,
            }) => {
                assert_eq!(opcode, 0x87);
                assert_eq!(offset, 0);
                assert_eq!(declared, 2);
                assert_eq!(consumed, 1);
            }
            other => panic!("expected length mismatch, got {other:?}"),
        }

        let actions = decode(&data, &DecodeOptions::lenient()).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].operand, Operand::StoreRegister(1));
        assert_eq!(actions[1].name(), Some(Opcode::Stop));
    }

    #[test]
    fn push_fills_declared_length() {
        // Push: null, register 3, int 7
        let data = [
            0x96, 0x08, 0x00, 0x02, 0x04, 0x03, 0x07, 0x07, 0x00, 0x00, 0x00, 0x00,
        ];
        let actions = decode(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(
            actions[0].operand,
            Operand::Push(vec![Value::Null, Value::Register(3), Value::Int(7)])
        );
    }

    #[test]
    fn missing_terminator_underflows() {
        assert!(matches!(
            decode(&[0x06, 0x07], &DecodeOptions::default()),
            Err(Error::BufferUnderflow { offset: 2, .. })
        ));
    }
}
