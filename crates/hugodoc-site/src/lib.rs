//! Page tree layout and Hugo page generation for hugodoc.
//!
//! This crate provides:
//! - [`PageTree`]: the documentation pages and their hierarchy
//! - [`PathResolver`]: output paths and relative links between pages
//! - [`TitleFormatter`] and [`PageAssembler`]: titles and front matter
//! - [`Site`]: preprocessing, rendering and writing of every page
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use hugodoc_config::Config;
//! use hugodoc_site::{MemorySink, PageTree, Site};
//!
//! let tree = PageTree::from_json(
//!     r#"{
//!         "name": "app",
//!         "key": "app",
//!         "kind": "module",
//!         "body": {"content": {"type": "text", "text": "Hello"}}
//!     }"#,
//! )?;
//! let site = Site::new(tree, &Config::default())?;
//!
//! let mut sink = MemorySink::new();
//! let report = site.generate(&mut sink)?;
//!
//! assert!(report.is_complete());
//! assert!(sink.get("app/_index.md").is_some());
//! assert!(sink.get("app/package-list").is_some());
//! # Ok(())
//! # }
//! ```

mod front_matter;
mod location;
mod navigation;
mod preprocess;
mod sink;
mod site;
mod title;
mod tree;

pub use front_matter::{FRONT_MATTER_DELIMITER, PAGE_TYPE, PageAssembler};
pub use location::{INDEX_FILENAME, PAGE_EXTENSION, PathResolver, identifier_to_filename};
pub use navigation::{BREADCRUMB_SEPARATOR, BreadcrumbItem, breadcrumbs, render_breadcrumbs};
pub use preprocess::{
    PACKAGE_LIST_NAME, PackageListCreator, Preprocessor, RootCreator, default_preprocessors,
};
pub use sink::{DirSink, MemorySink, OutputSink};
pub use site::{GenerateError, GenerationReport, PageFailure, RenderedPage, Site};
pub use title::{TitleFormatter, format_title};
pub use tree::{Page, PageBody, PageId, PageKind, PageSpec, PageTree, PageTreeBuilder, TreeError};
