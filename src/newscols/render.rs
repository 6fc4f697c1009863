//! # Render Targets
//!
//! A block is rendered in two contexts: live in the editing surface, and once
//! into static markup when the document is saved. Both go through
//! [`render_block`], which derives the style exactly once and hands it to a
//! [`Renderer`]. Renderers only decide how to present that style; they never
//! compute one, so the two contexts cannot disagree.
//!
//! Any UI layer can plug in by implementing [`Renderer`]: it receives the
//! derived [`StyleDeclaration`], the permitted child kinds and the starter
//! template, and produces whatever it needs.

use crate::block::{BlockType, ChildKind, TemplateEntry};
use crate::model::AttributeSet;
use crate::style::{derive_style, StyleDeclaration};

/// Everything a renderer gets for one block.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub class_name: &'a str,
    pub style: &'a StyleDeclaration,
    pub allowed_children: &'a [ChildKind],
    pub template: &'a [TemplateEntry],
    /// Serialized inner blocks, opaque to this crate
    pub content: &'a str,
}

/// A render target for columns blocks.
pub trait Renderer {
    type Output;

    fn render(&mut self, ctx: RenderContext<'_>) -> Self::Output;
}

/// Render `attrs` for `block_type` through `renderer`.
pub fn render_block<R: Renderer>(
    block_type: &BlockType,
    attrs: &AttributeSet,
    content: &str,
    renderer: &mut R,
) -> R::Output {
    let style = derive_style(attrs, &block_type.profile);
    let class_name = block_type.class_name();
    renderer.render(RenderContext {
        class_name: &class_name,
        style: &style,
        allowed_children: block_type.allowed_children,
        template: block_type.template,
        content,
    })
}

/// What the editing surface needs to draw a block: wrapper props and the
/// inner-blocks configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub class_name: String,
    pub style: StyleDeclaration,
    pub allowed_blocks: Vec<&'static str>,
    pub template: Vec<TemplateEntry>,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct EditingRenderer;

impl Renderer for EditingRenderer {
    type Output = EditorView;

    fn render(&mut self, ctx: RenderContext<'_>) -> EditorView {
        EditorView {
            class_name: ctx.class_name.to_string(),
            style: ctx.style.clone(),
            allowed_blocks: ctx.allowed_children.iter().map(|k| k.block_name()).collect(),
            template: ctx.template.to_vec(),
            content: ctx.content.to_string(),
        }
    }
}

/// Static wrapper markup: `<div class="…" style="…">content</div>`.
///
/// The `style` attribute is omitted when the declaration is empty.
#[derive(Debug, Default)]
pub struct PersistedRenderer;

impl Renderer for PersistedRenderer {
    type Output = String;

    fn render(&mut self, ctx: RenderContext<'_>) -> String {
        let mut out = format!("<div class=\"{}\"", escape_attr(ctx.class_name));
        if !ctx.style.is_empty() {
            out.push_str(&format!(" style=\"{}\"", escape_attr(&ctx.style.to_css_text())));
        }
        out.push('>');
        out.push_str(ctx.content);
        out.push_str("</div>");
        out
    }
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse of [`escape_attr`].
pub fn unescape_attr(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_view_carries_nesting_rules() {
        let view = render_block(
            &BlockType::NEWSPAPER_COLUMNS,
            &AttributeSet::default(),
            "",
            &mut EditingRenderer,
        );
        assert_eq!(view.class_name, "wp-block-newspaper-columns-newspaper-columns");
        assert_eq!(view.allowed_blocks, vec!["core/image", "core/paragraph", "core/heading"]);
        assert_eq!(view.template.len(), 3);
        assert_eq!(view.template[0].placeholder, "Add a title...");
    }

    #[test]
    fn persisted_markup_wraps_content() {
        let attrs = AttributeSet::empty().with("columnCount", 3);
        let html = render_block(
            &BlockType::NEWSPAPER_COLUMNS,
            &attrs,
            "<p>Hi</p>",
            &mut PersistedRenderer,
        );
        assert_eq!(
            html,
            "<div class=\"wp-block-newspaper-columns-newspaper-columns\" style=\"column-count:3\"><p>Hi</p></div>"
        );
    }

    #[test]
    fn persisted_markup_omits_empty_style() {
        let html = render_block(
            &BlockType::MULTI_COLUMNS,
            &AttributeSet::empty(),
            "",
            &mut PersistedRenderer,
        );
        assert_eq!(html, "<div class=\"wp-block-multi-columns-multi-columns\"></div>");
    }

    #[test]
    fn persisted_style_escapes_quotes() {
        let attrs = AttributeSet::empty().with("textColor", "a\"b<c>&");
        let html = render_block(&BlockType::NEWSPAPER_COLUMNS, &attrs, "", &mut PersistedRenderer);
        assert!(html.contains("style=\"color:a&quot;b&lt;c&gt;&amp;\""));
    }

    #[test]
    fn escape_roundtrip() {
        let raw = "x & \"y\" <z>";
        assert_eq!(unescape_attr(&escape_attr(raw)), raw);
    }

    #[test]
    fn both_renders_share_one_style() {
        let attrs = AttributeSet::default()
            .with("dropCapSize", "large")
            .with("dropCapColor", "#900")
            .with("columnRuleColor", "#ccc");
        for block_type in crate::block::BLOCK_TYPES {
            let view = render_block(block_type, &attrs, "", &mut EditingRenderer);
            let html = render_block(block_type, &attrs, "", &mut PersistedRenderer);
            let expected = format!("style=\"{}\"", escape_attr(&view.style.to_css_text()));
            assert!(html.contains(&expected), "{}", block_type.name);
        }
    }
}
