/// AVM1 action opcodes.
///
/// Opcodes below 0x80 carry no operand; opcodes at or above 0x80 are
/// followed by a 16-bit operand length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // Timeline (SWF 3)
    NextFrame = 0x04,
    PreviousFrame = 0x05,
    Play = 0x06,
    Stop = 0x07,
    ToggleQuality = 0x08,
    StopSounds = 0x09,

    // Arithmetic, comparison, logic (SWF 4)
    Add = 0x0A,
    Subtract = 0x0B,
    Multiply = 0x0C,
    Divide = 0x0D,
    Equals = 0x0E,
    Less = 0x0F,
    And = 0x10,
    Or = 0x11,
    Not = 0x12,

    // Strings (SWF 4)
    StringEquals = 0x13,
    StringLength = 0x14,
    StringExtract = 0x15,

    Pop = 0x17,
    ToInteger = 0x18,
    GetVariable = 0x1C,
    SetVariable = 0x1D,
    SetTarget2 = 0x20,
    StringAdd = 0x21,
    GetProperty = 0x22,
    SetProperty = 0x23,
    CloneSprite = 0x24,
    RemoveSprite = 0x25,
    Trace = 0x26,
    StartDrag = 0x27,
    EndDrag = 0x28,
    StringLess = 0x29,
    Throw = 0x2A,
    CastOp = 0x2B,
    ImplementsOp = 0x2C,
    RandomNumber = 0x30,
    MbStringLength = 0x31,
    CharToAscii = 0x32,
    AsciiToChar = 0x33,
    GetTime = 0x34,
    MbStringExtract = 0x35,
    MbCharToAscii = 0x36,
    MbAsciiToChar = 0x37,

    // Objects and functions (SWF 5)
    Delete = 0x3A,
    Delete2 = 0x3B,
    DefineLocal = 0x3C,
    CallFunction = 0x3D,
    Return = 0x3E,
    Modulo = 0x3F,
    NewObject = 0x40,
    DefineLocal2 = 0x41,
    InitArray = 0x42,
    InitObject = 0x43,
    TypeOf = 0x44,
    TargetPath = 0x45,
    Enumerate = 0x46,
    Add2 = 0x47,
    Less2 = 0x48,
    Equals2 = 0x49,
    ToNumber = 0x4A,
    ToString = 0x4B,
    PushDuplicate = 0x4C,
    StackSwap = 0x4D,
    GetMember = 0x4E,
    SetMember = 0x4F,
    Increment = 0x50,
    Decrement = 0x51,
    CallMethod = 0x52,
    NewMethod = 0x53,
    InstanceOf = 0x54,
    Enumerate2 = 0x55,

    // Bitwise and strict comparison (SWF 6/7)
    BitAnd = 0x60,
    BitOr = 0x61,
    BitXor = 0x62,
    BitLShift = 0x63,
    BitRShift = 0x64,
    BitURShift = 0x65,
    StrictEquals = 0x66,
    Greater = 0x67,
    StringGreater = 0x68,
    Extends = 0x69,

    // Length-prefixed operands
    GotoFrame = 0x81,
    GetUrl = 0x83,
    StoreRegister = 0x87,
    ConstantPool = 0x88,
    WaitForFrame = 0x8A,
    SetTarget = 0x8B,
    GotoLabel = 0x8C,
    WaitForFrame2 = 0x8D,
    DefineFunction2 = 0x8E,
    Try = 0x8F,
    With = 0x94,
    Push = 0x96,
    Jump = 0x99,
    GetUrl2 = 0x9A,
    DefineFunction = 0x9B,
    If = 0x9D,
    Call = 0x9E,
    GotoFrame2 = 0x9F,
}

impl Opcode {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x04 => Some(Self::NextFrame),
            0x05 => Some(Self::PreviousFrame),
            0x06 => Some(Self::Play),
            0x07 => Some(Self::Stop),
            0x08 => Some(Self::ToggleQuality),
            0x09 => Some(Self::StopSounds),
            0x0A => Some(Self::Add),
            0x0B => Some(Self::Subtract),
            0x0C => Some(Self::Multiply),
            0x0D => Some(Self::Divide),
            0x0E => Some(Self::Equals),
            0x0F => Some(Self::Less),
            0x10 => Some(Self::And),
            0x11 => Some(Self::Or),
            0x12 => Some(Self::Not),
            0x13 => Some(Self::StringEquals),
            0x14 => Some(Self::StringLength),
            0x15 => Some(Self::StringExtract),
            0x17 => Some(Self::Pop),
            0x18 => Some(Self::ToInteger),
            0x1C => Some(Self::GetVariable),
            0x1D => Some(Self::SetVariable),
            0x20 => Some(Self::SetTarget2),
            0x21 => Some(Self::StringAdd),
            0x22 => Some(Self::GetProperty),
            0x23 => Some(Self::SetProperty),
            0x24 => Some(Self::CloneSprite),
            0x25 => Some(Self::RemoveSprite),
            0x26 => Some(Self::Trace),
            0x27 => Some(Self::StartDrag),
            0x28 => Some(Self::EndDrag),
            0x29 => Some(Self::StringLess),
            0x2A => Some(Self::Throw),
            0x2B => Some(Self::CastOp),
            0x2C => Some(Self::ImplementsOp),
            0x30 => Some(Self::RandomNumber),
            0x31 => Some(Self::MbStringLength),
            0x32 => Some(Self::CharToAscii),
            0x33 => Some(Self::AsciiToChar),
            0x34 => Some(Self::GetTime),
            0x35 => Some(Self::MbStringExtract),
            0x36 => Some(Self::MbCharToAscii),
            0x37 => Some(Self::MbAsciiToChar),
            0x3A => Some(Self::Delete),
            0x3B => Some(Self::Delete2),
            0x3C => Some(Self::DefineLocal),
            0x3D => Some(Self::CallFunction),
            0x3E => Some(Self::Return),
            0x3F => Some(Self::Modulo),
            0x40 => Some(Self::NewObject),
            0x41 => Some(Self::DefineLocal2),
            0x42 => Some(Self::InitArray),
            0x43 => Some(Self::InitObject),
            0x44 => Some(Self::TypeOf),
            0x45 => Some(Self::TargetPath),
            0x46 => Some(Self::Enumerate),
            0x47 => Some(Self::Add2),
            0x48 => Some(Self::Less2),
            0x49 => Some(Self::Equals2),
            0x4A => Some(Self::ToNumber),
            0x4B => Some(Self::ToString),
            0x4C => Some(Self::PushDuplicate),
            0x4D => Some(Self::StackSwap),
            0x4E => Some(Self::GetMember),
            0x4F => Some(Self::SetMember),
            0x50 => Some(Self::Increment),
            0x51 => Some(Self::Decrement),
            0x52 => Some(Self::CallMethod),
            0x53 => Some(Self::NewMethod),
            0x54 => Some(Self::InstanceOf),
            0x55 => Some(Self::Enumerate2),
            0x60 => Some(Self::BitAnd),
            0x61 => Some(Self::BitOr),
            0x62 => Some(Self::BitXor),
            0x63 => Some(Self::BitLShift),
            0x64 => Some(Self::BitRShift),
            0x65 => Some(Self::BitURShift),
            0x66 => Some(Self::StrictEquals),
            0x67 => Some(Self::Greater),
            0x68 => Some(Self::StringGreater),
            0x69 => Some(Self::Extends),
            0x81 => Some(Self::GotoFrame),
            0x83 => Some(Self::GetUrl),
            0x87 => Some(Self::StoreRegister),
            0x88 => Some(Self::ConstantPool),
            0x8A => Some(Self::WaitForFrame),
            0x8B => Some(Self::SetTarget),
            0x8C => Some(Self::GotoLabel),
            0x8D => Some(Self::WaitForFrame2),
            0x8E => Some(Self::DefineFunction2),
            0x8F => Some(Self::Try),
            0x94 => Some(Self::With),
            0x96 => Some(Self::Push),
            0x99 => Some(Self::Jump),
            0x9A => Some(Self::GetUrl2),
            0x9B => Some(Self::DefineFunction),
            0x9D => Some(Self::If),
            0x9E => Some(Self::Call),
            0x9F => Some(Self::GotoFrame2),
            _ => None,
        }
    }

    /// Whether the opcode byte is followed by a 16-bit operand length.
    pub fn has_length(self) -> bool {
        has_length(self as u8)
    }
}

/// Opcodes with the high bit set carry a 16-bit operand length. Holds for
/// opcodes without a mnemonic too.
pub fn has_length(opcode: u8) -> bool {
    opcode >= 0x80
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_round_trips_discriminant() {
        for v in 0..=u8::MAX {
            if let Some(op) = Opcode::from_u8(v) {
                assert_eq!(op as u8, v);
            }
        }
    }

    #[test]
    fn length_prefix_follows_high_bit() {
        assert!(!Opcode::StringLength.has_length());
        assert!(Opcode::Push.has_length());
        assert!(Opcode::Call.has_length());
        assert_eq!(Opcode::from_u8(0x00), None);
        assert!(has_length(0xF7));
        assert!(!has_length(0x7F));
    }
}
