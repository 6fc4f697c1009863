use crate::commands::{BlockStyle, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;

use super::helpers::{load_document, resolve_block};

/// Derived style of block `number` (1-based), or of every block.
pub fn run<S: DocumentStore>(store: &S, name: &str, number: Option<usize>) -> Result<CmdResult> {
    let doc = load_document(store, name)?;
    let styles = match number {
        Some(number) => {
            let index = resolve_block(&doc, number)?;
            vec![BlockStyle::of(index, doc.block(index)?)]
        }
        None => doc
            .blocks()
            .enumerate()
            .map(|(index, block)| BlockStyle::of(index, block))
            .collect(),
    };
    Ok(CmdResult::default().with_styles(styles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn legacy_block_style_is_recomputed() {
        let fx = StoreFixture::new().with_legacy_post("post");
        let result = run(&fx.store, "post", Some(1)).unwrap();
        let style = &result.styles[0].style;

        assert_eq!(style.get("column-count"), Some("3"));
        assert_eq!(style.get("column-gap"), Some("30px"));
        assert_eq!(style.get("--drop-cap-font-size"), Some("3.8rem"));
        assert_eq!(style.get("--drop-cap-line-height"), Some("3.5rem"));
        // Keys missing from the stored bag take their defaults
        assert_eq!(style.get("padding-top"), Some("20px"));
        assert_eq!(style.get("column-width"), Some("200px"));
    }

    #[test]
    fn all_blocks_when_no_number() {
        let fx = StoreFixture::new().with_legacy_post("post");
        let result = run(&fx.store, "post", None).unwrap();
        assert_eq!(result.styles.len(), 1);
        assert_eq!(result.styles[0].block_name, "newspaper-columns/newspaper-columns");
    }

    #[test]
    fn style_is_read_only() {
        let fx = StoreFixture::new().with_legacy_post("post");
        run(&fx.store, "post", None).unwrap();
        assert_eq!(
            fx.store.read("post").unwrap(),
            crate::store::memory::fixtures::LEGACY_POST
        );
    }
}
