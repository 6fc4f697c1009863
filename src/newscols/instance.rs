//! # Block Instance Lifecycle
//!
//! A [`BlockInstance`] is one columns block inside a document. It moves
//! between two states:
//!
//! ```text
//!            new / load              on_attribute_change (accepted)
//!   ─────────────────────▶ Editing ◀───────────────────────────┐
//!                            │  ▲                              │
//!                       save │  │ on_attribute_change          │
//!                            ▼  │                              │
//!                          Persisted ──────────────────────────┘
//! ```
//!
//! Every accepted attribute change re-derives the style before returning, so
//! [`BlockInstance::style`] is never stale. Saving renders the persisted
//! markup from the same attribute set and the same derivation, which makes
//! the saved style identical to what the editor last showed.

use serde::Serialize;
use serde_json::Value;

use crate::attributes::{get_spec, AttrSideEffect};
use crate::block::{BlockType, ChildKind};
use crate::clamp::normalize;
use crate::codec::{parse_block, serialize_block, ParsedBlock};
use crate::error::Result;
use crate::model::AttributeSet;
use crate::render::{render_block, EditingRenderer, EditorView};
use crate::style::StyleDeclaration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Editing,
    Persisted,
}

/// Outcome of an editing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrChange {
    /// Stored value changed; style re-derived
    Applied,
    /// Normalized value equals the stored one
    Unchanged,
    /// Value could not be normalized (e.g. unknown rule style)
    Rejected,
    /// Attribute exists but this block type does not offer it
    Unsupported,
    /// No such attribute
    Unknown,
}

impl AttrChange {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttrChange::Applied | AttrChange::Unchanged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInstance {
    block_type: &'static BlockType,
    attrs: AttributeSet,
    view: EditorView,
    state: InstanceState,
    stored_style: Option<String>,
}

impl BlockInstance {
    /// Insert a new block: the profile's schema defaults plus the starter
    /// template.
    pub fn new(block_type: &'static BlockType) -> Self {
        Self::with_parts(
            block_type,
            AttributeSet::for_profile(&block_type.profile),
            starter_content(block_type),
            None,
        )
    }

    fn with_parts(
        block_type: &'static BlockType,
        attrs: AttributeSet,
        content: String,
        stored_style: Option<String>,
    ) -> Self {
        let view = render_block(block_type, &attrs, &content, &mut EditingRenderer);
        Self {
            block_type,
            attrs,
            view,
            state: InstanceState::Editing,
            stored_style,
        }
    }

    /// Load a block from its persisted markup.
    ///
    /// The style is recomputed from the stored attributes; the stored style
    /// text is kept only for drift reporting.
    pub fn load(markup: &str) -> Result<Self> {
        Ok(Self::from_parsed(parse_block(markup)?))
    }

    pub fn from_parsed(parsed: ParsedBlock) -> Self {
        Self::with_parts(
            parsed.block_type,
            parsed.attrs,
            parsed.content,
            parsed.stored_style,
        )
    }

    pub fn block_type(&self) -> &'static BlockType {
        self.block_type
    }

    pub fn attrs(&self) -> &AttributeSet {
        &self.attrs
    }

    pub fn content(&self) -> &str {
        &self.view.content
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Current derived style; always reflects the current attributes.
    pub fn style(&self) -> &StyleDeclaration {
        &self.view.style
    }

    pub fn editing_view(&self) -> &EditorView {
        &self.view
    }

    /// Style text found in the markup this block was loaded from, or last
    /// written by [`save`](Self::save).
    pub fn stored_style(&self) -> Option<&str> {
        self.stored_style.as_deref()
    }

    /// Handle one editing event: `raw` is what the control emitted.
    pub fn on_attribute_change(&mut self, name: &str, raw: &Value) -> AttrChange {
        let Some(spec) = get_spec(name) else {
            log::debug!("ignoring unknown attribute {}", name);
            return AttrChange::Unknown;
        };
        if !self.block_type.profile.supports(spec) {
            log::debug!("{} does not support {}", self.block_type.name, name);
            return AttrChange::Unsupported;
        }
        let Some(value) = normalize(name, raw, &self.attrs) else {
            log::debug!("rejected {} = {}", name, raw);
            return AttrChange::Rejected;
        };
        match self.attrs.set_attr(name, value) {
            None => AttrChange::Rejected,
            Some(AttrSideEffect::None) => AttrChange::Unchanged,
            Some(AttrSideEffect::Restyle) => {
                self.restyle();
                self.state = InstanceState::Editing;
                log::debug!("{} -> {}", name, self.view.style);
                AttrChange::Applied
            }
        }
    }

    /// Replace the inner content.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.view.content = content.into();
        self.state = InstanceState::Editing;
    }

    fn restyle(&mut self) {
        let content = std::mem::take(&mut self.view.content);
        self.view = render_block(self.block_type, &self.attrs, &content, &mut EditingRenderer);
    }

    /// Render the persisted markup and mark the block saved.
    pub fn save(&mut self) -> Result<String> {
        let markup = serialize_block(self.block_type, &self.attrs, &self.view.content)?;
        self.state = InstanceState::Persisted;
        self.stored_style = (!self.view.style.is_empty()).then(|| self.view.style.to_css_text());
        Ok(markup)
    }
}

/// Empty child blocks seeded from the block type's template. Placeholders
/// travel in the child's attributes; the child itself has no text yet.
pub fn starter_content(block_type: &BlockType) -> String {
    block_type
        .template
        .iter()
        .map(|entry| {
            let short = entry.kind.block_name().trim_start_matches("core/");
            let tag = match entry.kind {
                ChildKind::Heading => "<h2 class=\"wp-block-heading\"></h2>",
                ChildKind::Paragraph => "<p></p>",
                ChildKind::Image => "<figure class=\"wp-block-image\"></figure>",
            };
            let attrs = serde_json::json!({ "placeholder": entry.placeholder });
            format!("<!-- wp:{} {} -->\n{}\n<!-- /wp:{} -->", short, attrs, tag, short)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
