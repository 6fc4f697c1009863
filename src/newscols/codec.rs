//! # Persisted Block Markup
//!
//! A saved block is an HTML fragment framed by comment delimiters that carry
//! the attribute set as JSON:
//!
//! ```text
//! <!-- wp:newspaper-columns/newspaper-columns {"columnCount":3,...} -->
//! <div class="wp-block-newspaper-columns-newspaper-columns" style="column-count:3;...">INNER</div>
//! <!-- /wp:newspaper-columns/newspaper-columns -->
//! ```
//!
//! The JSON is the source of truth. It holds only the attributes the block
//! type's profile supports, and a missing key means the schema default, so
//! the host's bare `<!-- wp:NAME -->` form loads with every default. The
//! wrapper's `style` attribute is extracted only so drift can be reported;
//! it is never read back into the attribute set.
//!
//! Inside the delimiter JSON, `--`, `<`, `>` and `&` are written as unicode
//! escapes so the payload can never close the comment early.

use crate::block::BlockType;
use crate::error::{NewscolsError, Result};
use crate::model::AttributeSet;
use crate::render::{render_block, unescape_attr, PersistedRenderer};
use serde_json::{Map, Value};

/// A block as read from stored markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    pub block_type: &'static BlockType,
    pub attrs: AttributeSet,
    /// Inner markup, opaque
    pub content: String,
    /// Style text found on the stored wrapper, if any
    pub stored_style: Option<String>,
}

fn opener(block_type: &BlockType) -> String {
    format!("<!-- wp:{} ", block_type.name)
}

fn closer(block_type: &BlockType) -> String {
    format!("<!-- /wp:{} -->", block_type.name)
}

/// Escape serialized JSON for use inside an HTML comment.
pub fn escape_comment_json(json: &str) -> String {
    json.replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Serialize a block: delimiters, attribute JSON, and freshly rendered wrapper.
pub fn serialize_block(block_type: &BlockType, attrs: &AttributeSet, content: &str) -> Result<String> {
    let json = serde_json::to_string(&attrs.to_bag(&block_type.profile))?;
    let header = format!("<!-- wp:{} {} -->", block_type.name, escape_comment_json(&json));
    let wrapper = render_block(block_type, attrs, content, &mut PersistedRenderer);
    Ok(format!("{}\n{}\n{}", header, wrapper, closer(block_type)))
}

/// Find the earliest opening delimiter of any registered block type.
pub fn find_block_start(text: &str) -> Option<(usize, &'static BlockType)> {
    crate::block::BLOCK_TYPES
        .iter()
        .filter_map(|bt| text.find(&opener(bt)).map(|pos| (pos, bt)))
        .min_by_key(|(pos, _)| *pos)
}

/// Parse one block of type `block_type` starting at the beginning of `text`.
///
/// Returns the block and the number of bytes it spans.
pub fn parse_block_at(text: &str, block_type: &'static BlockType) -> Result<(ParsedBlock, usize)> {
    let open = opener(block_type);
    let after = text
        .strip_prefix(open.as_str())
        .ok_or_else(|| NewscolsError::Markup(format!("expected {}", open.trim_end())))?;
    let header_end = after.find("-->").ok_or_else(|| {
        NewscolsError::Markup(format!("unterminated delimiter for {}", block_type.name))
    })?;
    let mut header = after[..header_end].trim();
    let body_start = open.len() + header_end + "-->".len();

    // Void form: `<!-- wp:name {...} /-->`
    if let Some(stripped) = header.strip_suffix('/') {
        header = stripped.trim_end();
        let attrs = parse_attrs(header, block_type)?;
        let block = ParsedBlock {
            block_type,
            attrs,
            content: String::new(),
            stored_style: None,
        };
        return Ok((block, body_start));
    }

    let attrs = parse_attrs(header, block_type)?;
    let close = closer(block_type);
    let body_len = text[body_start..].find(&close).ok_or_else(|| {
        NewscolsError::Markup(format!("missing closing delimiter for {}", block_type.name))
    })?;
    let inner = &text[body_start..body_start + body_len];
    let (content, stored_style) = unwrap_wrapper(inner);

    let block = ParsedBlock {
        block_type,
        attrs,
        content,
        stored_style,
    };
    Ok((block, body_start + body_len + close.len()))
}

/// Parse a standalone block fragment.
pub fn parse_block(text: &str) -> Result<ParsedBlock> {
    let trimmed = text.trim();
    let (start, block_type) = find_block_start(trimmed)
        .ok_or_else(|| NewscolsError::Markup("no columns block found".to_string()))?;
    if start != 0 {
        return Err(NewscolsError::Markup(
            "unexpected markup before block delimiter".to_string(),
        ));
    }
    let (block, _) = parse_block_at(trimmed, block_type)?;
    Ok(block)
}

/// Attributes of a block of `block_type`; missing keys take the profile
/// defaults.
fn parse_attrs(header: &str, block_type: &BlockType) -> Result<AttributeSet> {
    let bag: Map<String, Value> = if header.is_empty() {
        Map::new()
    } else {
        serde_json::from_str(header)?
    };
    Ok(AttributeSet::from_bag(&bag, &block_type.profile))
}

/// Split the stored wrapper `<div …>…</div>` into inner content and its style
/// text. Markup without a wrapper is kept whole as content.
fn unwrap_wrapper(inner: &str) -> (String, Option<String>) {
    let trimmed = inner.trim();
    let Some(tag_end) = trimmed.find('>') else {
        return (trimmed.to_string(), None);
    };
    let content_end = trimmed.len().saturating_sub("</div>".len());
    if !trimmed.starts_with("<div") || !trimmed.ends_with("</div>") || tag_end + 1 > content_end {
        return (trimmed.to_string(), None);
    }
    let open_tag = &trimmed[..tag_end];
    let content = &trimmed[tag_end + 1..content_end];
    (content.to_string(), attribute_value(open_tag, "style"))
}

fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(unescape_attr(&tag[start..start + len]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropcap::DropCapPreset;

    #[test]
    fn serialize_frames_wrapper_with_delimiters() {
        let attrs = AttributeSet::for_profile(&BlockType::MULTI_COLUMNS.profile).with("columnCount", 3);
        let markup = serialize_block(&BlockType::MULTI_COLUMNS, &attrs, "<p>x</p>").unwrap();
        let lines: Vec<_> = markup.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("<!-- wp:multi-columns/multi-columns {"));
        assert!(lines[0].contains("\"columnCount\":3"));
        assert_eq!(
            lines[1],
            "<div class=\"wp-block-multi-columns-multi-columns\" style=\"column-count:3;column-width:200px;\
             column-gap:40px;column-rule-style:solid;column-rule-width:1px\"><p>x</p></div>"
        );
        assert_eq!(lines[2], "<!-- /wp:multi-columns/multi-columns -->");
    }

    #[test]
    fn basic_block_header_carries_only_supported_attributes() {
        let attrs = AttributeSet::for_profile(&BlockType::MULTI_COLUMNS.profile);
        let markup = serialize_block(&BlockType::MULTI_COLUMNS, &attrs, "").unwrap();
        let header = markup.lines().next().unwrap();
        assert!(!header.contains("padding"));
        assert!(!header.contains("dropCapSize"));
        assert!(!header.contains("columnRuleColor"));
        assert!(header.contains("\"columnGap\":40"));

        let full = AttributeSet::default().with("dropCapColor", "#900");
        let markup = serialize_block(&BlockType::MULTI_COLUMNS, &full, "").unwrap();
        let header = markup.lines().next().unwrap();
        assert!(!header.contains("dropCapColor"));
        assert!(!header.contains("padding"));
    }

    #[test]
    fn bare_delimiter_loads_profile_defaults() {
        for block_type in crate::block::BLOCK_TYPES {
            let markup = format!(
                "<!-- wp:{name} -->\n<div class=\"{class}\"></div>\n<!-- /wp:{name} -->",
                name = block_type.name,
                class = block_type.class_name()
            );
            let parsed = parse_block(&markup).unwrap();
            assert_eq!(
                parsed.attrs,
                AttributeSet::for_profile(&block_type.profile),
                "{}",
                block_type.name
            );
        }
    }

    #[test]
    fn wrapper_without_room_for_content_is_kept_whole() {
        let markup = "<!-- wp:multi-columns/multi-columns -->\n<div</div>\n<!-- /wp:multi-columns/multi-columns -->";
        let parsed = parse_block(markup).unwrap();
        assert_eq!(parsed.content, "<div</div>");
        assert_eq!(parsed.stored_style, None);

        let doc = crate::document::Document::parse(markup).unwrap();
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn empty_wrapper_has_empty_content() {
        let markup = "<!-- wp:multi-columns/multi-columns -->\n<div></div>\n<!-- /wp:multi-columns/multi-columns -->";
        let parsed = parse_block(markup).unwrap();
        assert_eq!(parsed.content, "");
        assert_eq!(parsed.stored_style, None);
    }

    #[test]
    fn comment_json_is_escaped() {
        let attrs = AttributeSet::empty().with("textColor", "<!--x-->&");
        let markup = serialize_block(&BlockType::NEWSPAPER_COLUMNS, &attrs, "").unwrap();
        let header = markup.lines().next().unwrap();
        assert_eq!(header.matches("-->").count(), 1);
        assert!(header.contains("\\u003c!\\u002d\\u002dx\\u002d\\u002d\\u003e\\u0026"));

        let parsed = parse_block(&markup).unwrap();
        assert_eq!(parsed.attrs.text_color(), Some("<!--x-->&"));
    }

    #[test]
    fn parse_recovers_attrs_content_and_style() {
        let attrs = AttributeSet::default().with("dropCapSize", "large");
        let markup = serialize_block(&BlockType::NEWSPAPER_COLUMNS, &attrs, "<h2>T</h2>").unwrap();
        let parsed = parse_block(&markup).unwrap();

        assert_eq!(parsed.block_type, &BlockType::NEWSPAPER_COLUMNS);
        assert_eq!(parsed.attrs, attrs);
        assert_eq!(parsed.content, "<h2>T</h2>");
        let style = parsed.stored_style.unwrap();
        assert!(style.contains("--drop-cap-font-size:6.2rem"));
    }

    #[test]
    fn parse_void_block() {
        let parsed =
            parse_block(r#"<!-- wp:multi-columns/multi-columns {"columnGap":12} /-->"#).unwrap();
        assert_eq!(parsed.attrs.column_gap(), Some(12));
        assert_eq!(parsed.content, "");
        assert_eq!(parsed.stored_style, None);
    }

    #[test]
    fn parse_legacy_block_without_drop_cap() {
        let legacy = "<!-- wp:newspaper-columns/newspaper-columns {\"columnCount\":3} -->\n\
                      <div class=\"wp-block-newspaper-columns-newspaper-columns\" style=\"column-count:3\"></div>\n\
                      <!-- /wp:newspaper-columns/newspaper-columns -->";
        let parsed = parse_block(legacy).unwrap();
        assert_eq!(parsed.attrs.drop_cap_size().unwrap().size(), DropCapPreset::Small);
        assert_eq!(parsed.stored_style.as_deref(), Some("column-count:3"));
    }

    #[test]
    fn parse_without_wrapper_keeps_content() {
        let markup = "<!-- wp:multi-columns/multi-columns -->\n<p>bare</p>\n<!-- /wp:multi-columns/multi-columns -->";
        let parsed = parse_block(markup).unwrap();
        assert_eq!(parsed.content, "<p>bare</p>");
        assert_eq!(parsed.stored_style, None);
    }

    #[test]
    fn parse_errors_on_malformed_markup() {
        assert!(matches!(
            parse_block("<p>no block</p>"),
            Err(NewscolsError::Markup(_))
        ));
        assert!(matches!(
            parse_block("<!-- wp:multi-columns/multi-columns {\"columnCount\":3}"),
            Err(NewscolsError::Markup(_))
        ));
        assert!(matches!(
            parse_block("<!-- wp:multi-columns/multi-columns -->\n<div></div>"),
            Err(NewscolsError::Markup(_))
        ));
        assert!(matches!(
            parse_block("<!-- wp:multi-columns/multi-columns {broken} --><!-- /wp:multi-columns/multi-columns -->"),
            Err(NewscolsError::Serialization(_))
        ));
    }

    #[test]
    fn find_block_start_picks_earliest() {
        let text = "intro <!-- wp:multi-columns/multi-columns --> x <!-- wp:newspaper-columns/newspaper-columns -->";
        let (pos, bt) = find_block_start(text).unwrap();
        assert_eq!(pos, 6);
        assert_eq!(bt, &BlockType::MULTI_COLUMNS);
        assert!(find_block_start("<!-- wp:core/paragraph -->").is_none());
    }
}
