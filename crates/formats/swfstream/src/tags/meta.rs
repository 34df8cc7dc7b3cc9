use crate::cursor::Cursor;
use crate::error::Result;
use crate::tag::{FileAttributes, SymbolName, Tag, TagHeader};
use crate::tag_stream::DecodeContext;

pub fn load_export_assets(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    Ok(Tag::ExportAssets(read_symbol_names(cursor)?))
}

pub fn load_symbol_class(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    Ok(Tag::SymbolClass(read_symbol_names(cursor)?))
}

/// u16 count, then count × (u16 character id, name).
fn read_symbol_names(cursor: &mut Cursor<'_>) -> Result<Vec<SymbolName>> {
    let count = cursor.read_u16()?;
    let mut names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let id = cursor.read_u16()?;
        let name = cursor.read_cstring()?;
        names.push(SymbolName { id, name });
    }
    Ok(names)
}

/// 32-bit flag word:
/// `reserved:1 direct_blit:1 gpu:1 metadata:1 as3:1 reserved:2 network:1 reserved:24`.
pub fn load_file_attributes(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    cursor.read_bits(1)?;
    let use_direct_blit = cursor.read_bit()?;
    let use_gpu = cursor.read_bit()?;
    let has_metadata = cursor.read_bit()?;
    let actionscript3 = cursor.read_bit()?;
    cursor.read_bits(2)?;
    let use_network = cursor.read_bit()?;
    cursor.read_bits(24)?;
    cursor.flush_to_byte_boundary();
    Ok(Tag::FileAttributes(FileAttributes {
        use_direct_blit,
        use_gpu,
        has_metadata,
        actionscript3,
        use_network,
    }))
}

pub fn load_metadata(
    cursor: &mut Cursor<'_>,
    _header: &TagHeader,
    _ctx: &DecodeContext<'_>,
) -> Result<Tag> {
    Ok(Tag::Metadata(cursor.read_cstring()?))
}
