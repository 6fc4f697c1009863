use crate::commands::{BlockSummary, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;

use super::helpers::load_document;

/// Blocks of document `name`, or the stored documents when no name is given.
pub fn run<S: DocumentStore>(store: &S, name: Option<&str>) -> Result<CmdResult> {
    let Some(name) = name else {
        let documents = store.list()?;
        let mut result = CmdResult::default();
        if documents.is_empty() {
            result.add_message(CmdMessage::info("No documents found."));
        }
        return Ok(result.with_documents(documents));
    };

    let doc = load_document(store, name)?;
    let blocks: Vec<_> = doc
        .blocks()
        .enumerate()
        .map(|(index, block)| BlockSummary::of(index, block))
        .collect();
    let mut result = CmdResult::default();
    if blocks.is_empty() {
        result.add_message(CmdMessage::info(format!("{} has no columns blocks.", name)));
    }
    Ok(result.with_blocks(blocks))
}
