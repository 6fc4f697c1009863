//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every newscols operation, whatever the UI.
//!
//! It dispatches to the command functions and normalizes inputs: block type
//! names become registered [`BlockType`]s, `name=value` assignments become
//! raw JSON control values. It performs no business logic and no I/O of its
//! own.
//!
//! ## Generic Over DocumentStore
//!
//! `NewscolsApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `NewscolsApi<FileStore>`
//! - Testing: `NewscolsApi<InMemoryStore>`

use crate::block::{get_block_type, BlockType};
use crate::commands;
use crate::error::{NewscolsError, Result};
use crate::store::DocumentStore;
use serde_json::Value;
use std::path::PathBuf;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

/// The main API facade for newscols operations.
pub struct NewscolsApi<S: DocumentStore> {
    store: S,
    config_dir: PathBuf,
}

impl<S: DocumentStore> NewscolsApi<S> {
    pub fn new(store: S, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    /// Add a block to `document`. `block_name` defaults to the configured block type.
    pub fn new_block(&mut self, document: &str, block_name: Option<&str>) -> Result<CmdResult> {
        let block_type = match block_name {
            Some(name) => resolve_block_type(name)?,
            None => crate::config::NewscolsConfig::load(&self.config_dir)?.default_block_type(),
        };
        commands::new::run(&mut self.store, document, block_type)
    }

    /// Apply `name=value` assignments to block `number` (1-based).
    pub fn set_attributes<A: AsRef<str>>(
        &mut self,
        document: &str,
        number: usize,
        assignments: &[A],
    ) -> Result<CmdResult> {
        let edits = assignments
            .iter()
            .map(|a| parse_assignment(a.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        commands::set::run(&mut self.store, document, number, &edits)
    }

    pub fn style(&self, document: &str, number: Option<usize>) -> Result<CmdResult> {
        commands::style::run(&self.store, document, number)
    }

    pub fn show(&self, document: Option<&str>) -> Result<CmdResult> {
        commands::show::run(&self.store, document)
    }

    pub fn check(&mut self, document: &str, heal: bool) -> Result<CmdResult> {
        commands::check::run(&mut self.store, document, heal)
    }

    pub fn schema(&self, block_name: Option<&str>) -> Result<CmdResult> {
        commands::schema::run(block_name)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

fn resolve_block_type(name: &str) -> Result<&'static BlockType> {
    get_block_type(name).ok_or_else(|| NewscolsError::UnknownBlockType(name.to_string()))
}

/// Split `name=value` into an attribute name and the raw value a control
/// would emit. JSON literals (`3`, `null`, `{"top":"1em"}`) are taken as
/// JSON; anything else is a plain string.
pub fn parse_assignment(assignment: &str) -> Result<(String, Value)> {
    let (name, raw) = assignment.split_once('=').ok_or_else(|| {
        NewscolsError::Api(format!("Expected name=value, got '{}'", assignment))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(NewscolsError::Api(format!(
            "Missing attribute name in '{}'",
            assignment
        )));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use serde_json::json;
    use tempfile::tempdir;

    fn api() -> (NewscolsApi<InMemoryStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let api = NewscolsApi::new(InMemoryStore::new(), dir.path().to_path_buf());
        (api, dir)
    }

    #[test]
    fn parse_assignment_values() {
        assert_eq!(parse_assignment("columnCount=3").unwrap(), ("columnCount".into(), json!(3)));
        assert_eq!(
            parse_assignment("textColor=#222").unwrap(),
            ("textColor".into(), json!("#222"))
        );
        assert_eq!(parse_assignment("textColor=").unwrap(), ("textColor".into(), json!("")));
        assert_eq!(
            parse_assignment(r#"padding={"top":"1em"}"#).unwrap(),
            ("padding".into(), json!({"top": "1em"}))
        );
        assert_eq!(parse_assignment("a=b=c").unwrap(), ("a".into(), json!("b=c")));
        assert!(matches!(parse_assignment("columnCount"), Err(NewscolsError::Api(_))));
        assert!(matches!(parse_assignment("=3"), Err(NewscolsError::Api(_))));
    }

    #[test]
    fn new_block_uses_configured_default() {
        let (mut api, _dir) = api();
        api.config(ConfigAction::Set(
            "default-block".into(),
            "multi-columns/multi-columns".into(),
        ))
        .unwrap();
        let result = api.new_block("post", None).unwrap();
        assert_eq!(result.styles[0].block_name, "multi-columns/multi-columns");
    }

    #[test]
    fn new_block_rejects_unknown_type() {
        let (mut api, _dir) = api();
        assert!(matches!(
            api.new_block("post", Some("core/columns")),
            Err(NewscolsError::UnknownBlockType(_))
        ));
    }

    #[test]
    fn set_dispatches_parsed_assignments() {
        let (mut api, _dir) = api();
        api.new_block("post", None).unwrap();
        let result = api
            .set_attributes("post", 1, &["columnCount=10", "columnRuleStyle=dashed"])
            .unwrap();
        assert_eq!(result.edits.len(), 2);

        let style = api.style("post", Some(1)).unwrap();
        assert_eq!(style.styles[0].style.get("column-count"), Some("6"));
        assert_eq!(style.styles[0].style.get("column-rule-style"), Some("dashed"));
    }

    #[test]
    fn show_and_check_dispatch() {
        let (mut api, _dir) = api();
        api.new_block("post", Some("newspaper-columns/newspaper-columns"))
            .unwrap();
        assert_eq!(api.show(None).unwrap().documents, vec!["post"]);
        assert_eq!(api.show(Some("post")).unwrap().blocks.len(), 1);
        assert!(api.check("post", false).unwrap().drift[0].is_clean());
        assert_eq!(api.schema(None).unwrap().attributes.len(), 11);
    }
}
