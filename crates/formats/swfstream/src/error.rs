use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset:#x} (need {need} more bytes)")]
    BufferUnderflow { offset: u64, need: u64 },

    #[error(
        "tag {code} at offset {offset:#x} declared {declared} bytes but its loader consumed {consumed}"
    )]
    Structural {
        code: u16,
        offset: u64,
        declared: u64,
        consumed: u64,
    },

    #[error("tag {code} at offset {offset:#x} has negative length {length}")]
    NegativeLength { code: u16, offset: u64, length: i32 },

    #[error("unknown action opcode {opcode:#04x} at offset {offset:#x}")]
    UnknownOpcode { opcode: u8, offset: u64 },

    #[error(
        "action {opcode:#04x} at offset {offset:#x} declared {declared} operand bytes but consumed {consumed}"
    )]
    ActionLength {
        opcode: u8,
        offset: u64,
        declared: u16,
        consumed: u64,
    },

    #[error("unknown push value type {type_id} at offset {offset:#x}")]
    InvalidPushType { type_id: u8, offset: u64 },

    #[error("cannot read {bits} bits into a 32-bit value")]
    InvalidBitWidth { bits: u32 },

    #[error("invalid signature {found:?}")]
    InvalidSignature { found: [u8; 3] },

    #[error("unsupported body compression {signature:?}")]
    UnsupportedCompression { signature: [u8; 3] },

    #[error("a loader for tag {code} is already registered")]
    DuplicateTagLoader { code: u16 },

    #[error("a loader for action {opcode:#04x} is already registered")]
    DuplicateActionLoader { opcode: u8 },

    #[error("cannot register a loader for id {id}: {reason}")]
    InvalidLoaderId { id: u16, reason: &'static str },

    #[error("tag {code} at offset {offset:#x} nests deeper than {max_depth} levels")]
    NestingTooDeep {
        code: u16,
        offset: u64,
        max_depth: usize,
    },

    #[error("I/O error at offset {offset:#x}: {source}")]
    Io {
        offset: u64,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
