use super::DocumentStore;
use crate::error::{NewscolsError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: BTreeMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| NewscolsError::DocumentNotFound(name.to_string()))
    }

    fn write(&mut self, name: &str, markup: &str) -> Result<()> {
        if name.is_empty() {
            return Err(NewscolsError::Store("document name is empty".to_string()));
        }
        self.documents.insert(name.to_string(), markup.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::block::BlockType;
    use crate::document::Document;
    use crate::instance::BlockInstance;

    /// Markup saved before drop-cap support existed: no `dropCapSize`, and a
    /// wrapper style that no longer matches what the attributes derive.
    pub const LEGACY_POST: &str = "<p>Lead paragraph.</p>\n\
        <!-- wp:newspaper-columns/newspaper-columns {\"columnCount\":3,\"columnGap\":30} -->\n\
        <div class=\"wp-block-newspaper-columns-newspaper-columns\" style=\"column-count:3;column-gap:30px\">\
        <!-- wp:paragraph -->\n<p>Body text.</p>\n<!-- /wp:paragraph --></div>\n\
        <!-- /wp:newspaper-columns/newspaper-columns -->\n";

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// A document holding one fresh block of each type in `types`.
        pub fn with_document(mut self, name: &str, types: &[&'static BlockType]) -> Self {
            let mut doc = Document::new();
            for &block_type in types {
                doc.push_block(BlockInstance::new(block_type));
            }
            let markup = doc.save().unwrap();
            self.store.write(name, &markup).unwrap();
            self
        }

        pub fn with_markup(mut self, name: &str, markup: &str) -> Self {
            self.store.write(name, markup).unwrap();
            self
        }

        pub fn with_legacy_post(self, name: &str) -> Self {
            self.with_markup(name, LEGACY_POST)
        }
    }
}
