use crate::commands::{AttrEdit, BlockStyle, CmdMessage, CmdResult};
use crate::error::Result;
use crate::instance::AttrChange;
use crate::store::DocumentStore;
use serde_json::Value;

use super::helpers::{load_document, resolve_block, save_document};

/// Apply `edits` to block `number` (1-based) of document `name`, in order,
/// as a sequence of editing events. The document is written back only if at
/// least one edit changed a stored value.
pub fn run<S: DocumentStore>(
    store: &mut S,
    name: &str,
    number: usize,
    edits: &[(String, Value)],
) -> Result<CmdResult> {
    let mut doc = load_document(store, name)?;
    let index = resolve_block(&doc, number)?;
    let mut result = CmdResult::default();
    let mut changed = false;

    let block = doc.block_mut(index)?;
    for (attr, raw) in edits {
        let change = block.on_attribute_change(attr, raw);
        let value = block.attrs().get_attr(attr).map(|v| v.display());
        let shown = value.clone().unwrap_or_else(|| "(none)".to_string());
        let message = match change {
            AttrChange::Applied => {
                changed = true;
                CmdMessage::success(format!("{} set to {}", attr, shown))
            }
            AttrChange::Unchanged => CmdMessage::info(format!("{} unchanged ({})", attr, shown)),
            AttrChange::Rejected => {
                CmdMessage::warning(format!("{} rejected {}, kept {}", attr, raw, shown))
            }
            AttrChange::Unsupported => CmdMessage::warning(format!(
                "{} is not available on {}",
                attr,
                block.block_type().title
            )),
            AttrChange::Unknown => CmdMessage::error(format!("Unknown attribute: {}", attr)),
        };
        result.add_message(message);
        result.edits.push(AttrEdit {
            name: attr.clone(),
            change,
            value,
        });
    }
    let style = BlockStyle::of(index, block);

    if changed {
        save_document(store, name, &mut doc)?;
    }
    Ok(result.with_styles(vec![style]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::commands::MessageLevel;
    use crate::error::NewscolsError;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn edit(name: &str, raw: Value) -> (String, Value) {
        (name.to_string(), raw)
    }

    fn fixture() -> StoreFixture {
        StoreFixture::new().with_document(
            "post",
            &[&BlockType::NEWSPAPER_COLUMNS, &BlockType::MULTI_COLUMNS],
        )
    }

    #[test]
    fn clamps_and_persists() {
        let mut fx = fixture();
        let result = run(&mut fx.store, "post", 1, &[edit("columnCount", json!(10))]).unwrap();

        assert_eq!(result.edits[0].change, AttrChange::Applied);
        assert_eq!(result.edits[0].value.as_deref(), Some("6"));
        assert_eq!(result.styles[0].style.get("column-count"), Some("6"));
        let markup = fx.store.read("post").unwrap();
        assert!(markup.contains("\"columnCount\":6"));
        assert!(markup.contains("column-count:6"));
    }

    #[test]
    fn edits_apply_in_order() {
        let mut fx = fixture();
        let result = run(
            &mut fx.store,
            "post",
            1,
            &[
                edit("columnGap", json!("25")),
                edit("columnGap", json!("")),
                edit("columnRuleStyle", json!("polka-dot")),
                edit("columnSpan", json!(2)),
            ],
        )
        .unwrap();

        let changes: Vec<_> = result.edits.iter().map(|e| e.change).collect();
        assert_eq!(
            changes,
            vec![
                AttrChange::Applied,
                AttrChange::Unchanged,
                AttrChange::Rejected,
                AttrChange::Unknown
            ]
        );
        assert_eq!(result.edits[1].value.as_deref(), Some("25"));
        assert_eq!(result.edits[2].value.as_deref(), Some("solid"));
        assert!(result.has_errors());
        assert_eq!(result.messages[2].level, MessageLevel::Warning);
    }

    #[test]
    fn unsupported_attribute_on_basic_block() {
        let mut fx = fixture();
        let before = fx.store.read("post").unwrap();
        let result = run(&mut fx.store, "post", 2, &[edit("dropCapSize", json!("large"))]).unwrap();

        assert_eq!(result.edits[0].change, AttrChange::Unsupported);
        assert!(!result.styles[0].style.contains("--drop-cap-font-size"));
        assert_eq!(fx.store.read("post").unwrap(), before);
    }

    #[test]
    fn drop_cap_change_updates_both_metrics() {
        let mut fx = fixture();
        let result = run(&mut fx.store, "post", 1, &[edit("dropCapSize", json!("large"))]).unwrap();
        let style = &result.styles[0].style;
        assert_eq!(style.get("--drop-cap-font-size"), Some("6.2rem"));
        assert_eq!(style.get("--drop-cap-line-height"), Some("5.2rem"));
    }

    #[test]
    fn block_out_of_range() {
        let mut fx = fixture();
        assert!(matches!(
            run(&mut fx.store, "post", 3, &[edit("columnCount", json!(3))]),
            Err(NewscolsError::BlockOutOfRange { index: 3, count: 2 })
        ));
    }
}
