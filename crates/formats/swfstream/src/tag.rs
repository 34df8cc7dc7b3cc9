use serde::Serialize;

use crate::avm1::ActionRecord;

/// Header of a single record in a tag stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagHeader {
    /// Tag id (top 10 bits of the header word).
    pub code: u16,
    /// Declared payload length in bytes.
    pub length: u32,
    /// Offset of the header word.
    pub offset: u64,
    /// Size of the header: 2 bytes, or 6 with an extended length.
    pub header_len: u8,
}

impl TagHeader {
    /// Offset where the payload begins.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_len as u64
    }

    /// Offset one past the last payload byte.
    pub fn end_offset(&self) -> u64 {
        self.data_offset() + self.length as u64
    }

    /// Whether the length was stored in the extended 32-bit field.
    pub fn is_long(&self) -> bool {
        self.header_len > 2
    }
}

/// A decoded tag together with its header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRecord {
    pub header: TagHeader,
    pub tag: Tag,
}

/// Decoded tag payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Tag {
    ShowFrame,
    SetBackgroundColor(Rgb),
    /// Action bytecode executed when the frame is reached.
    DoAction(Vec<ActionRecord>),
    DefineSprite(Sprite),
    FrameLabel(FrameLabel),
    ExportAssets(Vec<SymbolName>),
    /// Action bytecode run once before a sprite's first frame.
    DoInitAction(InitAction),
    ScriptLimits(ScriptLimits),
    FileAttributes(FileAttributes),
    /// Compiled AVM2 bytecode, kept as an opaque block.
    DoAbc(DoAbc),
    SymbolClass(Vec<SymbolName>),
    Metadata(String),
    /// Payload of a custom loader that keeps raw bytes.
    Opaque(Vec<u8>),
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::ShowFrame => "ShowFrame",
            Tag::SetBackgroundColor(_) => "SetBackgroundColor",
            Tag::DoAction(_) => "DoAction",
            Tag::DefineSprite(_) => "DefineSprite",
            Tag::FrameLabel(_) => "FrameLabel",
            Tag::ExportAssets(_) => "ExportAssets",
            Tag::DoInitAction(_) => "DoInitAction",
            Tag::ScriptLimits(_) => "ScriptLimits",
            Tag::FileAttributes(_) => "FileAttributes",
            Tag::DoAbc(_) => "DoAbc",
            Tag::SymbolClass(_) => "SymbolClass",
            Tag::Metadata(_) => "Metadata",
            Tag::Opaque(_) => "Opaque",
        }
    }

    /// Nested tags of a container record.
    pub fn children(&self) -> &[TagRecord] {
        match self {
            Tag::DefineSprite(sprite) => &sprite.tags,
            _ => &[],
        }
    }

    /// Action records carried by an action-bearing tag.
    pub fn actions(&self) -> &[ActionRecord] {
        match self {
            Tag::DoAction(actions) => actions,
            Tag::DoInitAction(init) => &init.actions,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A symbol with its own timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sprite {
    pub id: u16,
    pub frame_count: u16,
    pub tags: Vec<TagRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameLabel {
    pub name: String,
    /// Named anchor flag, present only in v6+ movies.
    pub is_anchor: bool,
}

/// Character id paired with an export or class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolName {
    pub id: u16,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitAction {
    pub sprite_id: u16,
    pub actions: Vec<ActionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScriptLimits {
    pub max_recursion_depth: u16,
    pub timeout_seconds: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FileAttributes {
    pub use_direct_blit: bool,
    pub use_gpu: bool,
    pub has_metadata: bool,
    pub actionscript3: bool,
    pub use_network: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoAbc {
    /// Flag word; absent in the original (id 72) form.
    pub flags: Option<u32>,
    /// Block name; absent in the original (id 72) form.
    pub name: Option<String>,
    pub data: Vec<u8>,
}

impl DoAbc {
    pub const LAZY_INITIALIZE: u32 = 1;

    pub fn is_lazy(&self) -> bool {
        self.flags.is_some_and(|f| f & Self::LAZY_INITIALIZE != 0)
    }
}
