//! Content tree renderer with pluggable markdown backends.
//!
//! This crate provides a generic [`ContentRenderer`] that turns a
//! documentation [`ContentNode`] tree into markdown text using the
//! [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! Rules shared by every output (groups, source-set filtering, divergent
//! collapsing, table padding) live in the generic renderer, while
//! format-specific elements are delegated to the backend:
//! - [`HugoBackend`]: `relref` links, HTML tables with markdown cells
//! - [`GfmBackend`]: plain GitHub-flavored markdown with pipe tables
//!
//! Internal link addresses are mapped to output targets through a
//! [`LinkResolver`] supplied by the caller.
//!
//! # Example
//!
//! ```
//! use hugodoc_renderer::{ContentNode, ContentRenderer, HugoBackend, IdentityLinks};
//!
//! let node = ContentNode::paragraph(vec![
//!     ContentNode::text("See "),
//!     ContentNode::link("https://kotlinlang.org", "Kotlin"),
//! ]);
//! let out = ContentRenderer::<HugoBackend>::new(&IdentityLinks)
//!     .render(&node)
//!     .unwrap();
//! assert_eq!(out, "\n\nSee [Kotlin](https://kotlinlang.org)\n\n");
//! ```

mod backend;
mod content;
mod gfm;
mod hugo;
mod links;
mod renderer;
mod util;

pub use backend::RenderBackend;
pub use content::{
    ContentKind, ContentNode, DivergentInstance, GroupStyle, SourceSet, TableRow,
};
pub use gfm::GfmBackend;
pub use hugo::{HugoBackend, MARKDOWN_END, MARKDOWN_START};
pub use links::{IdentityLinks, LinkResolver};
pub use renderer::ContentRenderer;
pub use util::{is_external, relative_path};

/// Error raised while rendering a content tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// An internal link address names nothing known.
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),
    /// A node kind without a rendering rule.
    #[error("Unsupported content node: {0}")]
    UnsupportedNode(String),
}
