//! Built-in tag loaders, one module per family.

pub mod control;
pub mod meta;
pub mod script;
pub mod sprite;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::registry::TagRegistryBuilder;
use crate::tag::TagHeader;

pub const SHOW_FRAME: u16 = 1;
pub const SET_BACKGROUND_COLOR: u16 = 9;
pub const DO_ACTION: u16 = 12;
pub const DEFINE_SPRITE: u16 = 39;
pub const FRAME_LABEL: u16 = 43;
pub const EXPORT_ASSETS: u16 = 56;
pub const DO_INIT_ACTION: u16 = 59;
pub const SCRIPT_LIMITS: u16 = 65;
pub const FILE_ATTRIBUTES: u16 = 69;
pub const DO_ABC_V1: u16 = 72;
pub const SYMBOL_CLASS: u16 = 76;
pub const METADATA: u16 = 77;
pub const DO_ABC: u16 = 82;

/// Register every built-in tag loader.
pub fn register_builtin(registry: &mut TagRegistryBuilder) -> Result<()> {
    registry
        .register(SHOW_FRAME, control::load_show_frame)?
        .register(SET_BACKGROUND_COLOR, control::load_background_color)?
        .register(FRAME_LABEL, control::load_frame_label)?
        .register(DO_ACTION, script::load_do_action)?
        .register(DO_INIT_ACTION, script::load_do_init_action)?
        .register(DO_ABC_V1, script::load_do_abc_v1)?
        .register(DO_ABC, script::load_do_abc)?
        .register(SCRIPT_LIMITS, script::load_script_limits)?
        .register(DEFINE_SPRITE, sprite::load_define_sprite)?
        .register(EXPORT_ASSETS, meta::load_export_assets)?
        .register(SYMBOL_CLASS, meta::load_symbol_class)?
        .register(FILE_ATTRIBUTES, meta::load_file_attributes)?
        .register(METADATA, meta::load_metadata)?;
    Ok(())
}

/// Payload bytes of `header` not yet consumed.
pub(crate) fn remaining(cursor: &Cursor<'_>, header: &TagHeader) -> u64 {
    header.end_offset().saturating_sub(cursor.bytes_read())
}
