use crate::document::Document;
use crate::error::{NewscolsError, Result};
use crate::store::DocumentStore;

pub fn load_document<S: DocumentStore>(store: &S, name: &str) -> Result<Document> {
    let markup = store.read(name)?;
    let doc = Document::parse(&markup)?;
    log::debug!("loaded {} ({} blocks)", name, doc.block_count());
    Ok(doc)
}

pub fn save_document<S: DocumentStore>(store: &mut S, name: &str, doc: &mut Document) -> Result<()> {
    let markup = doc.save()?;
    store.write(name, &markup)?;
    log::debug!("saved {} ({} blocks)", name, doc.block_count());
    Ok(())
}

/// Convert a 1-based block number to an index into `doc`.
pub fn resolve_block(doc: &Document, number: usize) -> Result<usize> {
    let count = doc.block_count();
    if number == 0 || number > count {
        return Err(NewscolsError::BlockOutOfRange {
            index: number,
            count,
        });
    }
    Ok(number - 1)
}
