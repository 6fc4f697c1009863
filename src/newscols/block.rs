//! # Block Types
//!
//! A block type is what the host platform registers: a unique name, display
//! metadata, the nesting rules for its inner content, a starter template, and
//! a [`Profile`] saying which optional attribute groups it supports.
//!
//! Two types are registered, sharing one attribute schema:
//!
//! | Name | Profile |
//! |------|---------|
//! | `newspaper-columns/newspaper-columns` | padding, rule colour, drop capital |
//! | `multi-columns/multi-columns` | columns and rule only |
//!
//! Both permit only heading, paragraph and image children.

use crate::attributes::{AttributeSpec, Capability, ATTRIBUTES};

/// Capability set of a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub capabilities: &'static [Capability],
}

impl Profile {
    pub const FULL: Profile = Profile {
        name: "full",
        capabilities: &[Capability::Padding, Capability::RuleColor, Capability::DropCap],
    };

    pub const BASIC: Profile = Profile {
        name: "basic",
        capabilities: &[],
    };

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Whether an attribute takes effect under this profile.
    pub fn supports(&self, spec: &AttributeSpec) -> bool {
        spec.capability.map_or(true, |cap| self.has(cap))
    }

    /// Whether the attribute called `name` exists and is supported.
    pub fn supports_attr(&self, name: &str) -> bool {
        crate::attributes::get_spec(name).is_some_and(|spec| self.supports(spec))
    }

    pub fn attributes(&self) -> impl Iterator<Item = &'static AttributeSpec> + '_ {
        ATTRIBUTES.iter().filter(move |spec| self.supports(spec))
    }
}

/// Kinds of child block allowed inside a columns block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildKind {
    Heading,
    Paragraph,
    Image,
}

impl ChildKind {
    /// Host block name of this child kind.
    pub fn block_name(&self) -> &'static str {
        match self {
            ChildKind::Heading => "core/heading",
            ChildKind::Paragraph => "core/paragraph",
            ChildKind::Image => "core/image",
        }
    }

    pub fn from_block_name(name: &str) -> Option<Self> {
        match name {
            "core/heading" => Some(ChildKind::Heading),
            "core/paragraph" => Some(ChildKind::Paragraph),
            "core/image" => Some(ChildKind::Image),
            _ => None,
        }
    }
}

/// One entry of the starter template inserted with a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub kind: ChildKind,
    pub placeholder: &'static str,
}

const ALLOWED_CHILDREN: &[ChildKind] = &[ChildKind::Image, ChildKind::Paragraph, ChildKind::Heading];

const STARTER_TEMPLATE: &[TemplateEntry] = &[
    TemplateEntry {
        kind: ChildKind::Heading,
        placeholder: "Add a title...",
    },
    TemplateEntry {
        kind: ChildKind::Paragraph,
        placeholder: "Add text here...",
    },
    TemplateEntry {
        kind: ChildKind::Paragraph,
        placeholder: "Add more text here...",
    },
];

/// Registration descriptor of a block type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockType {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub text_domain: &'static str,
    pub profile: Profile,
    pub allowed_children: &'static [ChildKind],
    pub template: &'static [TemplateEntry],
}

impl BlockType {
    pub const NEWSPAPER_COLUMNS: BlockType = BlockType {
        name: "newspaper-columns/newspaper-columns",
        title: "Newspaper Columns",
        description: "Text that wraps across two or more columns, like a newspaper",
        category: "text",
        text_domain: "newspaper-columns-block",
        profile: Profile::FULL,
        allowed_children: ALLOWED_CHILDREN,
        template: STARTER_TEMPLATE,
    };

    pub const MULTI_COLUMNS: BlockType = BlockType {
        name: "multi-columns/multi-columns",
        title: "Multi-columns",
        description: "Text that wraps across two or more columns, like a newspaper",
        category: "text",
        text_domain: "multi-columns",
        profile: Profile::BASIC,
        allowed_children: ALLOWED_CHILDREN,
        template: STARTER_TEMPLATE,
    };

    /// Class the host puts on the block wrapper (`wp-block-<namespace>-<name>`).
    pub fn class_name(&self) -> String {
        format!("wp-block-{}", self.name.replace('/', "-"))
    }

    /// Whether a child block with host name `block_name` may be nested inside.
    pub fn permits(&self, block_name: &str) -> bool {
        ChildKind::from_block_name(block_name)
            .is_some_and(|kind| self.allowed_children.contains(&kind))
    }
}

/// All registered block types.
pub const BLOCK_TYPES: &[BlockType] = &[BlockType::NEWSPAPER_COLUMNS, BlockType::MULTI_COLUMNS];

/// Look up a block type by its registered name.
pub fn get_block_type(name: &str) -> Option<&'static BlockType> {
    BLOCK_TYPES.iter().find(|bt| bt.name == name)
}
