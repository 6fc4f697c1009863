use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DocumentStore;

use super::helpers::{load_document, save_document};

/// Compare stored wrapper styles with fresh derivations. With `heal`, drifted
/// documents are re-saved, which re-renders every block from its attributes.
pub fn run<S: DocumentStore>(store: &mut S, name: &str, heal: bool) -> Result<CmdResult> {
    let mut doc = load_document(store, name)?;
    let reports = doc.check();
    let mut result = CmdResult::default();

    let drifted: Vec<_> = reports.iter().filter(|r| !r.style_in_sync()).collect();
    for report in &drifted {
        log::info!(
            "{} block {}: stored style {:?} differs from {:?}",
            name,
            report.index + 1,
            report.stored_style,
            report.derived_style
        );
    }
    for report in reports.iter().filter(|r| !r.disallowed_children.is_empty()) {
        result.add_message(CmdMessage::warning(format!(
            "Block {} contains blocks it does not allow: {}",
            report.index + 1,
            report.disallowed_children.join(", ")
        )));
    }

    if drifted.is_empty() {
        result.add_message(CmdMessage::success("All block styles are in sync."));
    } else if heal {
        save_document(store, name, &mut doc)?;
        result.add_message(CmdMessage::success(format!(
            "Re-rendered {} drifted block(s).",
            drifted.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} block(s) have a stored style that no longer matches their attributes.",
            drifted.len()
        )));
        result.add_message(CmdMessage::info("Run with --heal to re-render them."));
    }

    Ok(result.with_drift(reports))
}
