//! Content tree data model.
//!
//! A page body is a tree of [`ContentNode`]s produced by an external
//! documentation host. The renderer only reads it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Platform or compilation target a piece of content applies to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SourceSet(String);

impl SourceSet {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout of a [`ContentNode::Group`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GroupStyle {
    /// Children followed by a line break.
    Block,
    /// Children surrounded by blank lines.
    Paragraph,
}

/// Semantic kind of a group or table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ContentKind {
    #[default]
    Main,
    /// Symbol signature, rendered in bold.
    Symbol,
    /// Code samples, one table per source set.
    Sample,
    /// Parameter descriptions, one table per source set.
    Parameters,
    Packages,
    Comment,
    Source,
}

impl ContentKind {
    /// Whether tables of this kind are split per source set.
    #[must_use]
    pub fn splits_per_source_set(self) -> bool {
        matches!(self, Self::Sample | Self::Parameters)
    }
}

/// A table row. Rows may be restricted to some source sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableRow {
    pub cells: Vec<ContentNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_sets: Vec<SourceSet>,
}

impl TableRow {
    #[must_use]
    pub fn new(cells: Vec<ContentNode>) -> Self {
        Self {
            cells,
            source_sets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source_sets(mut self, source_sets: Vec<SourceSet>) -> Self {
        self.source_sets = source_sets;
        self
    }
}

/// One variant (e.g. one overload) of a documented symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DivergentInstance {
    /// Content shared by all variants, shown before the variant part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub before: Option<Box<ContentNode>>,
    /// Variant-specific content.
    pub divergent: Box<ContentNode>,
    /// Content shared by all variants, shown after the variant part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub after: Option<Box<ContentNode>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_sets: Vec<SourceSet>,
}

/// Node of a page's content tree.
///
/// Empty `source_sets` lists mean "every source set".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum ContentNode {
    Group {
        children: Vec<ContentNode>,
        #[cfg_attr(feature = "serde", serde(default))]
        style: Option<GroupStyle>,
        #[cfg_attr(feature = "serde", serde(default))]
        kind: ContentKind,
        #[cfg_attr(feature = "serde", serde(default))]
        source_sets: Vec<SourceSet>,
    },
    Table {
        #[cfg_attr(feature = "serde", serde(default))]
        header: Vec<ContentNode>,
        #[cfg_attr(feature = "serde", serde(default))]
        rows: Vec<TableRow>,
        #[cfg_attr(feature = "serde", serde(default))]
        kind: ContentKind,
        #[cfg_attr(feature = "serde", serde(default))]
        source_sets: Vec<SourceSet>,
    },
    CodeBlock {
        #[cfg_attr(feature = "serde", serde(default))]
        language: Option<String>,
        children: Vec<ContentNode>,
    },
    CodeInline {
        children: Vec<ContentNode>,
    },
    Link {
        address: String,
        children: Vec<ContentNode>,
    },
    /// Content whose rendering may differ per source set.
    PlatformHinted {
        inner: Box<ContentNode>,
        #[cfg_attr(feature = "serde", serde(default))]
        source_sets: Vec<SourceSet>,
    },
    /// Variants of one symbol (e.g. overloads) sharing surrounding text.
    Divergent {
        instances: Vec<DivergentInstance>,
    },
    Header {
        level: u8,
        children: Vec<ContentNode>,
    },
    List {
        #[cfg_attr(feature = "serde", serde(default))]
        ordered: bool,
        items: Vec<ContentNode>,
    },
    Text {
        text: String,
    },
    Break,
    /// Node kind the producer emitted but no rendering rule exists for.
    Unsupported {
        kind: String,
    },
}

impl ContentNode {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Unstyled group of children.
    #[must_use]
    pub fn group(children: Vec<ContentNode>) -> Self {
        Self::Group {
            children,
            style: None,
            kind: ContentKind::Main,
            source_sets: Vec::new(),
        }
    }

    #[must_use]
    pub fn styled(style: GroupStyle, children: Vec<ContentNode>) -> Self {
        Self::Group {
            children,
            style: Some(style),
            kind: ContentKind::Main,
            source_sets: Vec::new(),
        }
    }

    #[must_use]
    pub fn paragraph(children: Vec<ContentNode>) -> Self {
        Self::styled(GroupStyle::Paragraph, children)
    }

    #[must_use]
    pub fn block(children: Vec<ContentNode>) -> Self {
        Self::styled(GroupStyle::Block, children)
    }

    #[must_use]
    pub fn symbol(children: Vec<ContentNode>) -> Self {
        Self::Group {
            children,
            style: None,
            kind: ContentKind::Symbol,
            source_sets: Vec::new(),
        }
    }

    /// Group restricted to the given source sets.
    #[must_use]
    pub fn scoped(source_sets: Vec<SourceSet>, children: Vec<ContentNode>) -> Self {
        Self::Group {
            children,
            style: None,
            kind: ContentKind::Main,
            source_sets,
        }
    }

    #[must_use]
    pub fn link(address: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Link {
            address: address.into(),
            children: vec![Self::text(label)],
        }
    }

    #[must_use]
    pub fn code_block(language: Option<&str>, code: impl Into<String>) -> Self {
        Self::CodeBlock {
            language: language.map(str::to_owned),
            children: vec![Self::text(code)],
        }
    }

    #[must_use]
    pub fn code_inline(code: impl Into<String>) -> Self {
        Self::CodeInline {
            children: vec![Self::text(code)],
        }
    }

    #[must_use]
    pub fn hinted(source_sets: Vec<SourceSet>, inner: ContentNode) -> Self {
        Self::PlatformHinted {
            inner: Box::new(inner),
            source_sets,
        }
    }

    /// Generic table from header and rows.
    #[must_use]
    pub fn table(header: Vec<ContentNode>, rows: Vec<TableRow>) -> Self {
        Self::Table {
            header,
            rows,
            kind: ContentKind::Main,
            source_sets: Vec::new(),
        }
    }

    /// Name of the node kind, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Group { .. } => "group",
            Self::Table { .. } => "table",
            Self::CodeBlock { .. } => "code_block",
            Self::CodeInline { .. } => "code_inline",
            Self::Link { .. } => "link",
            Self::PlatformHinted { .. } => "platform_hinted",
            Self::Divergent { .. } => "divergent",
            Self::Header { .. } => "header",
            Self::List { .. } => "list",
            Self::Text { .. } => "text",
            Self::Break => "break",
            Self::Unsupported { kind } => kind.as_str(),
        }
    }
}
