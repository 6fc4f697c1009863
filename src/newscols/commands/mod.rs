//! # Command Layer
//!
//! The business logic of every operation lives here, one submodule per
//! command. Commands load documents from a
//! [`DocumentStore`](crate::store::DocumentStore), drive block
//! instances through their editing events, and write the result back.
//!
//! Commands never print, never exit and never prompt. They return a
//! [`CmdResult`] carrying structured data plus leveled messages; the UI
//! decides how to show it.
//!
//! ## Testing Strategy
//!
//! Command tests use [`InMemoryStore`](crate::store::memory::InMemoryStore)
//! and its fixtures, and check the returned `CmdResult` and the stored
//! markup.
//!
//! ## Command Modules
//!
//! - [`new`]: Create a document or append a block to one
//! - [`set`]: Apply attribute edits to a block
//! - [`style`]: Derived style of one or all blocks
//! - [`show`]: Blocks and attributes of a document, or the document list
//! - [`check`]: Drift between stored and derived styles; optional healing
//! - [`schema`]: Attribute schema per block type
//! - [`config`]: Manage configuration
//! - [`helpers`]: Shared utilities

use crate::attributes::ATTRIBUTES;
use crate::config::NewscolsConfig;
use crate::document::DriftReport;
use crate::instance::{AttrChange, BlockInstance, InstanceState};
use crate::style::StyleDeclaration;
use serde::Serialize;

pub mod check;
pub mod config;
pub mod helpers;
pub mod new;
pub mod schema;
pub mod set;
pub mod show;
pub mod style;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Derived style of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    pub index: usize,
    pub block_name: &'static str,
    pub style: StyleDeclaration,
}

impl BlockStyle {
    pub fn of(index: usize, block: &BlockInstance) -> Self {
        Self {
            index,
            block_name: block.block_type().name,
            style: block.style().clone(),
        }
    }
}

/// Everything `show` reports about one block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub index: usize,
    pub block_name: &'static str,
    pub state: InstanceState,
    /// `(attribute, displayed value)` for every present, supported attribute
    pub attributes: Vec<(&'static str, String)>,
    pub children: usize,
}

impl BlockSummary {
    pub fn of(index: usize, block: &BlockInstance) -> Self {
        let profile = block.block_type().profile;
        let attributes = ATTRIBUTES
            .iter()
            .filter(|spec| profile.supports(spec))
            .filter_map(|spec| {
                block
                    .attrs()
                    .get_attr(spec.name)
                    .map(|value| (spec.name, value.display()))
            })
            .collect();
        Self {
            index,
            block_name: block.block_type().name,
            state: block.state(),
            attributes,
            children: crate::document::child_block_names(block.content()).len(),
        }
    }
}

/// Outcome of one attribute edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttrEdit {
    pub name: String,
    pub change: AttrChange,
    /// Stored value after the edit, if present
    pub value: Option<String>,
}

/// One row of the attribute schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInfo {
    pub name: &'static str,
    pub kind: &'static str,
    pub range: Option<(u32, u32)>,
    pub options: Vec<&'static str>,
    pub default: Option<&'static str>,
    pub block_types: Vec<&'static str>,
}

/// Structured outcome of a command. Serializes with empty parts omitted,
/// which is what `--json` prints.
#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<CmdMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<BlockStyle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<BlockSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<AttrEdit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drift: Vec<DriftReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<NewscolsConfig>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_styles(mut self, styles: Vec<BlockStyle>) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<BlockSummary>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_drift(mut self, drift: Vec<DriftReport>) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeInfo>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_documents(mut self, documents: Vec<String>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_config(mut self, config: NewscolsConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}
