//! Loader tables for tags and actions.
//!
//! A registry is assembled once through its builder, then frozen. Frozen
//! registries are `Send + Sync` and are shared by reference across any
//! number of concurrent decodes.

use std::collections::HashMap;

use crate::avm1::{ActionHeader, Operand};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::tag::{Tag, TagHeader};
use crate::tag_stream::DecodeContext;

/// Largest id representable in the 10-bit header field.
pub const MAX_TAG_CODE: u16 = 0x3FF;

/// Decodes the payload of one tag id.
///
/// The loader must consume exactly `header.length` bytes.
pub trait TagLoader: Send + Sync {
    fn load(&self, cursor: &mut Cursor<'_>, header: &TagHeader, ctx: &DecodeContext<'_>)
        -> Result<Tag>;
}

impl<F> TagLoader for F
where
    F: Fn(&mut Cursor<'_>, &TagHeader, &DecodeContext<'_>) -> Result<Tag> + Send + Sync,
{
    fn load(
        &self,
        cursor: &mut Cursor<'_>,
        header: &TagHeader,
        ctx: &DecodeContext<'_>,
    ) -> Result<Tag> {
        self(cursor, header, ctx)
    }
}

/// Decodes the operand of one opcode.
pub trait ActionLoader: Send + Sync {
    fn load(&self, cursor: &mut Cursor<'_>, header: &ActionHeader) -> Result<Operand>;
}

impl<F> ActionLoader for F
where
    F: Fn(&mut Cursor<'_>, &ActionHeader) -> Result<Operand> + Send + Sync,
{
    fn load(&self, cursor: &mut Cursor<'_>, header: &ActionHeader) -> Result<Operand> {
        self(cursor, header)
    }
}

/// Frozen tag id → loader table.
pub struct TagRegistry {
    loaders: HashMap<u16, Box<dyn TagLoader>>,
}

impl TagRegistry {
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::default()
    }

    pub fn get(&self, code: u16) -> Option<&dyn TagLoader> {
        self.loaders.get(&code).map(|l| l.as_ref())
    }

    pub fn contains(&self, code: u16) -> bool {
        self.loaders.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

#[derive(Default)]
pub struct TagRegistryBuilder {
    loaders: HashMap<u16, Box<dyn TagLoader>>,
}

impl TagRegistryBuilder {
    /// Register a loader. Fails for id 0 (the terminator), ids that do not fit
    /// the header, and ids that already have a loader.
    pub fn register(&mut self, code: u16, loader: impl TagLoader + 'static) -> Result<&mut Self> {
        if code == 0 {
            return Err(Error::InvalidLoaderId {
                id: code,
                reason: "tag 0 terminates a stream",
            });
        }
        if code > MAX_TAG_CODE {
            return Err(Error::InvalidLoaderId {
                id: code,
                reason: "tag ids are 10 bits wide",
            });
        }
        if self.loaders.contains_key(&code) {
            return Err(Error::DuplicateTagLoader { code });
        }
        self.loaders.insert(code, Box::new(loader));
        Ok(self)
    }

    pub fn build(self) -> TagRegistry {
        TagRegistry {
            loaders: self.loaders,
        }
    }
}

/// Frozen opcode → loader table.
pub struct ActionRegistry {
    loaders: HashMap<u8, Box<dyn ActionLoader>>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    pub fn get(&self, opcode: u8) -> Option<&dyn ActionLoader> {
        self.loaders.get(&opcode).map(|l| l.as_ref())
    }

    pub fn contains(&self, opcode: u8) -> bool {
        self.loaders.contains_key(&opcode)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

#[derive(Default)]
pub struct ActionRegistryBuilder {
    loaders: HashMap<u8, Box<dyn ActionLoader>>,
}

impl ActionRegistryBuilder {
    /// Register a loader. Fails for opcode 0 (the terminator) and opcodes that
    /// already have a loader.
    pub fn register(
        &mut self,
        opcode: u8,
        loader: impl ActionLoader + 'static,
    ) -> Result<&mut Self> {
        if opcode == 0 {
            return Err(Error::InvalidLoaderId {
                id: 0,
                reason: "opcode 0 terminates a stream",
            });
        }
        if self.loaders.contains_key(&opcode) {
            return Err(Error::DuplicateActionLoader { opcode });
        }
        self.loaders.insert(opcode, Box::new(loader));
        Ok(self)
    }

    pub fn build(self) -> ActionRegistry {
        ActionRegistry {
            loaders: self.loaders,
        }
    }
}

/// The pair of registries a decode needs.
pub struct Registries {
    pub tags: TagRegistry,
    pub actions: ActionRegistry,
}

impl Registries {
    pub fn new(tags: TagRegistry, actions: ActionRegistry) -> Self {
        Self { tags, actions }
    }

    /// Registries holding every built-in tag and action loader.
    pub fn standard() -> Result<Self> {
        let mut tags = TagRegistry::builder();
        crate::tags::register_builtin(&mut tags)?;
        let mut actions = ActionRegistry::builder();
        crate::avm1::register_builtin(&mut actions)?;
        Ok(Self::new(tags.build(), actions.build()))
    }
}

impl std::fmt::Debug for Registries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registries")
            .field("tags", &self.tags.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}
