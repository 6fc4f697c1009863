//! # Documents
//!
//! A document is post markup: arbitrary HTML with zero or more columns
//! blocks embedded. [`Document::parse`] splits it into opaque markup
//! segments and [`BlockInstance`]s; [`Document::save`] writes it back,
//! re-rendering every block from its attributes. Markup between blocks is
//! preserved byte for byte.
//!
//! [`Document::check`] compares each block's stored wrapper style with the
//! style its attributes derive to today, and lists child blocks the block
//! type does not permit. Saving a document heals style drift.

use serde::Serialize;

use crate::codec::{find_block_start, parse_block_at};
use crate::error::{NewscolsError, Result};
use crate::instance::BlockInstance;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Markup(String),
    Block(BlockInstance),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = text;
        while let Some((start, block_type)) = find_block_start(rest) {
            if start > 0 {
                segments.push(Segment::Markup(rest[..start].to_string()));
            }
            let (parsed, len) = parse_block_at(&rest[start..], block_type)?;
            segments.push(Segment::Block(BlockInstance::from_parsed(parsed)));
            rest = &rest[start + len..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Markup(rest.to_string()));
        }
        Ok(Self { segments })
    }

    /// Serialize the document, marking every block persisted.
    pub fn save(&mut self) -> Result<String> {
        let mut out = String::new();
        for segment in &mut self.segments {
            match segment {
                Segment::Markup(text) => out.push_str(text),
                Segment::Block(block) => out.push_str(&block.save()?),
            }
        }
        Ok(out)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BlockInstance> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Block(block) => Some(block),
            Segment::Markup(_) => None,
        })
    }

    fn blocks_mut(&mut self) -> impl Iterator<Item = &mut BlockInstance> {
        self.segments.iter_mut().filter_map(|s| match s {
            Segment::Block(block) => Some(block),
            Segment::Markup(_) => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Block at zero-based `index`, counting blocks only.
    pub fn block(&self, index: usize) -> Result<&BlockInstance> {
        let count = self.block_count();
        self.blocks()
            .nth(index)
            .ok_or(NewscolsError::BlockOutOfRange { index, count })
    }

    pub fn block_mut(&mut self, index: usize) -> Result<&mut BlockInstance> {
        let count = self.block_count();
        self.blocks_mut()
            .nth(index)
            .ok_or(NewscolsError::BlockOutOfRange { index, count })
    }

    /// Append a block, separated from preceding content by a blank line.
    pub fn push_block(&mut self, block: BlockInstance) {
        if !self.segments.is_empty() {
            self.segments.push(Segment::Markup("\n\n".to_string()));
        }
        self.segments.push(Segment::Block(block));
    }

    pub fn check(&self) -> Vec<DriftReport> {
        self.blocks()
            .enumerate()
            .map(|(index, block)| DriftReport::for_block(index, block))
            .collect()
    }
}

/// Comparison of one block's stored markup with what it renders to now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub index: usize,
    pub block_name: &'static str,
    pub stored_style: Option<String>,
    pub derived_style: String,
    pub disallowed_children: Vec<String>,
}

impl DriftReport {
    pub fn for_block(index: usize, block: &BlockInstance) -> Self {
        let block_type = block.block_type();
        let disallowed_children = child_block_names(block.content())
            .into_iter()
            .filter(|name| !block_type.permits(name))
            .fold(Vec::new(), |mut acc, name| {
                if !acc.contains(&name) {
                    acc.push(name);
                }
                acc
            });
        Self {
            index,
            block_name: block_type.name,
            stored_style: block.stored_style().map(str::to_string),
            derived_style: block.style().to_css_text(),
            disallowed_children,
        }
    }

    pub fn style_in_sync(&self) -> bool {
        self.stored_style.as_deref().unwrap_or("") == self.derived_style
    }

    pub fn is_clean(&self) -> bool {
        self.style_in_sync() && self.disallowed_children.is_empty()
    }
}

/// Host names of the blocks opened in `content`, in order. Short names
/// without a namespace belong to `core/`.
pub fn child_block_names(content: &str) -> Vec<String> {
    const OPEN: &str = "<!-- wp:";
    let mut names = Vec::new();
    let mut rest = content;
    while let Some(pos) = rest.find(OPEN) {
        rest = &rest[pos + OPEN.len()..];
        let Some(name) = rest.split_whitespace().next() else {
            break;
        };
        if name.contains('/') {
            names.push(name.to_string());
        } else {
            names.push(format!("core/{}", name));
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::instance::InstanceState;
    use serde_json::json;

    const LEGACY: &str = "<p>Intro</p>\n\
        <!-- wp:newspaper-columns/newspaper-columns {\"columnCount\":3} -->\n\
        <div class=\"wp-block-newspaper-columns-newspaper-columns\" style=\"column-count:3\"><!-- wp:paragraph -->\n<p>A</p>\n<!-- /wp:paragraph --></div>\n\
        <!-- /wp:newspaper-columns/newspaper-columns -->\n\
        <p>Between</p>\n\
        <!-- wp:multi-columns/multi-columns {\"columnGap\":15} /-->\n\
        <p>Outro</p>\n";

    #[test]
    fn parse_splits_markup_and_blocks() {
        let doc = Document::parse(LEGACY).unwrap();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.segments().len(), 5);
        assert!(matches!(&doc.segments()[0], Segment::Markup(m) if m == "<p>Intro</p>\n"));
        assert_eq!(doc.block(1).unwrap().attrs().column_gap(), Some(15));
    }

    #[test]
    fn plain_html_has_no_blocks() {
        let mut doc = Document::parse("<p>nothing here</p>").unwrap();
        assert_eq!(doc.block_count(), 0);
        assert_eq!(doc.save().unwrap(), "<p>nothing here</p>");
    }

    #[test]
    fn save_preserves_surrounding_markup() {
        let mut doc = Document::parse(LEGACY).unwrap();
        let saved = doc.save().unwrap();
        assert!(saved.starts_with("<p>Intro</p>\n<!-- wp:newspaper-columns/newspaper-columns "));
        assert!(saved.contains("\n<p>Between</p>\n"));
        assert!(saved.ends_with("<p>Outro</p>\n"));
        assert!(doc.blocks().all(|b| b.state() == InstanceState::Persisted));
    }

    #[test]
    fn check_reports_legacy_drift_and_save_heals_it() {
        let doc = Document::parse(LEGACY).unwrap();
        let reports = doc.check();
        assert_eq!(reports.len(), 2);
        assert!(!reports[0].style_in_sync());
        assert_eq!(reports[0].stored_style.as_deref(), Some("column-count:3"));
        assert!(reports[0].derived_style.contains("--drop-cap-font-size:3.8rem"));

        let mut doc = doc;
        let saved = doc.save().unwrap();
        let reloaded = Document::parse(&saved).unwrap();
        assert!(reloaded.check().iter().all(DriftReport::is_clean));
    }

    #[test]
    fn resave_is_stable() {
        let mut doc = Document::parse(LEGACY).unwrap();
        let first = doc.save().unwrap();
        let second = Document::parse(&first).unwrap().save().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn disallowed_children_are_reported_once() {
        let mut block = BlockInstance::new(&BlockType::NEWSPAPER_COLUMNS);
        block.set_content(
            "<!-- wp:list -->\n<ul></ul>\n<!-- /wp:list -->\
             <!-- wp:image {\"id\":1} /-->\
             <!-- wp:list -->\n<ul></ul>\n<!-- /wp:list -->\
             <!-- wp:acme/widget /-->",
        );
        let mut doc = Document::new();
        doc.push_block(block);
        let report = &doc.check()[0];
        assert_eq!(report.disallowed_children, vec!["core/list", "acme/widget"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn block_index_out_of_range() {
        let mut doc = Document::parse(LEGACY).unwrap();
        assert!(matches!(
            doc.block_mut(2),
            Err(NewscolsError::BlockOutOfRange { index: 2, count: 2 })
        ));
    }

    #[test]
    fn edits_through_block_mut_are_saved() {
        let mut doc = Document::parse(LEGACY).unwrap();
        doc.block_mut(0)
            .unwrap()
            .on_attribute_change("columnRuleStyle", &json!("dotted"));
        let saved = doc.save().unwrap();
        assert!(saved.contains("\"columnRuleStyle\":\"dotted\""));
        assert!(saved.contains("column-rule-style:dotted"));
    }

    #[test]
    fn child_names_are_namespaced() {
        let names = child_block_names("<!-- wp:heading --><h2></h2><!-- /wp:heading --><!-- wp:core/image /-->");
        assert_eq!(names, vec!["core/heading", "core/image"]);
    }
}
