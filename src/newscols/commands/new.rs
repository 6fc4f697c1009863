use crate::block::BlockType;
use crate::commands::{BlockStyle, CmdMessage, CmdResult};
use crate::document::Document;
use crate::error::Result;
use crate::instance::BlockInstance;
use crate::store::DocumentStore;

use super::helpers::{load_document, save_document};

/// Insert a fresh block of `block_type` at the end of document `name`,
/// creating the document if needed.
pub fn run<S: DocumentStore>(
    store: &mut S,
    name: &str,
    block_type: &'static BlockType,
) -> Result<CmdResult> {
    let (mut doc, created) = if store.exists(name) {
        (load_document(store, name)?, false)
    } else {
        (Document::new(), true)
    };

    doc.push_block(BlockInstance::new(block_type));
    save_document(store, name, &mut doc)?;

    let number = doc.block_count();
    let block = doc.block(number - 1)?;
    let mut result = CmdResult::default().with_styles(vec![BlockStyle::of(number - 1, block)]);
    if created {
        result.add_message(CmdMessage::success(format!("Created document {}", name)));
    }
    result.add_message(CmdMessage::success(format!(
        "Added {} as block {}",
        block_type.title, number
    )));
    Ok(result)
}
