use serde::Serialize;

use crate::avm1::opcode::Opcode;

/// Framing of a single action: the opcode and its declared operand length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionHeader {
    pub opcode: u8,
    /// Operand length; always 0 for opcodes below 0x80.
    pub length: u16,
    /// Offset of the opcode byte.
    pub offset: u64,
}

/// A decoded action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRecord {
    /// Offset of the opcode byte.
    pub offset: u64,
    pub opcode: u8,
    /// Declared operand length (0 for opcodes below 0x80).
    pub length: u16,
    pub operand: Operand,
}

impl ActionRecord {
    /// Mnemonic for known opcodes, `None` for custom ones.
    pub fn name(&self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode)
    }
}

/// Operand data for an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Operand {
    /// No operand.
    None,
    GotoFrame(u16),
    GetUrl {
        url: String,
        target: String,
    },
    StoreRegister(u8),
    ConstantPool(Vec<String>),
    WaitForFrame {
        frame: u16,
        skip_count: u8,
    },
    SetTarget(String),
    GotoLabel(String),
    WaitForFrame2 {
        skip_count: u8,
    },
    DefineFunction(Box<DefineFunction>),
    DefineFunction2(Box<DefineFunction2>),
    Try(Box<TryBlock>),
    /// Size in bytes of the `with` body that follows.
    With {
        size: u16,
    },
    Push(Vec<Value>),
    /// Branch offset relative to the next action.
    Jump(i16),
    If(i16),
    GetUrl2(GetUrl2),
    GotoFrame2 {
        play: bool,
        scene_bias: Option<u16>,
    },
    /// Raw operand bytes from a custom loader.
    Opaque(Vec<u8>),
}

impl Operand {
    /// Bytes the loader consumed past the declared operand length.
    ///
    /// A `Try` record swallows its try/catch/finally blocks, which follow the
    /// operand in the stream rather than sitting inside it.
    pub fn trailing_len(&self) -> u64 {
        match self {
            Operand::Try(t) => t.try_block.len + t.catch_block.len + t.finally_block.len,
            _ => 0,
        }
    }
}

/// A literal pushed by `Push`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    String(String),
    Float(f32),
    Null,
    Undefined,
    Register(u8),
    Bool(bool),
    Double(f64),
    Int(i32),
    /// Index into the active constant pool.
    Constant(u16),
}

impl Value {
    pub const STRING: u8 = 0;
    pub const FLOAT: u8 = 1;
    pub const NULL: u8 = 2;
    pub const UNDEFINED: u8 = 3;
    pub const REGISTER: u8 = 4;
    pub const BOOL: u8 = 5;
    pub const DOUBLE: u8 = 6;
    pub const INT: u8 = 7;
    pub const CONSTANT8: u8 = 8;
    pub const CONSTANT16: u8 = 9;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineFunction {
    pub name: String,
    pub params: Vec<String>,
    /// Byte length of the function body following this action.
    pub code_size: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefineFunction2 {
    pub name: String,
    pub register_count: u8,
    pub flags: FunctionFlags,
    pub params: Vec<FunctionParam>,
    pub code_size: u16,
}

/// Register preload/suppress flags of `DefineFunction2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FunctionFlags {
    pub preload_parent: bool,
    pub preload_root: bool,
    pub suppress_super: bool,
    pub preload_super: bool,
    pub suppress_arguments: bool,
    pub preload_arguments: bool,
    pub suppress_this: bool,
    pub preload_this: bool,
    pub preload_global: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionParam {
    /// Register the argument is copied into; 0 means none.
    pub register: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatchTarget {
    Variable(String),
    Register(u8),
}

/// Byte extent of an undecoded sub-block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockRange {
    pub offset: u64,
    pub len: u64,
}

impl BlockRange {
    pub fn end(&self) -> u64 {
        self.offset + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TryBlock {
    pub has_catch: bool,
    pub has_finally: bool,
    pub catch_target: CatchTarget,
    pub try_block: BlockRange,
    pub catch_block: BlockRange,
    pub finally_block: BlockRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SendVarsMethod {
    None,
    Get,
    Post,
    /// The reserved fourth value.
    Reserved,
}

impl SendVarsMethod {
    pub fn from_bits(v: u32) -> Self {
        match v {
            0 => Self::None,
            1 => Self::Get,
            2 => Self::Post,
            _ => Self::Reserved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GetUrl2 {
    pub send_vars_method: SendVarsMethod,
    /// Target is a sprite path rather than a browser window.
    pub load_target: bool,
    pub load_variables: bool,
}
