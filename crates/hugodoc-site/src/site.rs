//! Site generation.
//!
//! [`Site`] owns the preprocessed page tree and the front matter settings.
//! Generation renders every page independently and then writes the results
//! in tree order:
//! - pages with a content body get breadcrumbs, rendered content and front matter
//! - raw bodies (the package list) are written verbatim
//! - pages without a body are skipped
//!
//! # Thread Safety
//!
//! Rendering only reads the tree and the configuration, so pages are
//! rendered on the global rayon thread pool. Writes to the sink happen on
//! the calling thread.

use std::io;

use hugodoc_config::Config;
use hugodoc_renderer::{ContentRenderer, HugoBackend, RenderError};
use rayon::prelude::*;

use crate::front_matter::PageAssembler;
use crate::location::PathResolver;
use crate::navigation::{breadcrumbs, render_breadcrumbs};
use crate::preprocess::{Preprocessor, default_preprocessors};
use crate::sink::OutputSink;
use crate::title::TitleFormatter;
use crate::tree::{PageBody, PageId, PageTree, TreeError};

/// Site generation error.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Page content could not be rendered.
    #[error("Failed to render page {page}: {source}")]
    Render {
        /// Key of the failing page.
        page: String,
        #[source]
        source: RenderError,
    },
    /// Front matter could not be serialized.
    #[error("Front matter error: {0}")]
    FrontMatter(#[from] toml::ser::Error),
    /// Output could not be written.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    /// Page id does not belong to the site's tree.
    #[error("Page not found: {0}")]
    PageNotFound(PageId),
    /// Preprocessing produced an invalid tree.
    #[error("Invalid page tree: {0}")]
    Tree(#[from] TreeError),
}

/// A finished output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output path relative to the content directory.
    pub path: String,
    /// Full file content.
    pub content: String,
}

/// Page that failed to render.
#[derive(Debug)]
pub struct PageFailure {
    /// Key of the page.
    pub key: String,
    pub error: GenerateError,
}

/// Result of generating a site with partial failures.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Paths written, in tree order.
    pub written: Vec<String>,
    /// Pages skipped because they failed to render.
    pub failed: Vec<PageFailure>,
}

impl GenerationReport {
    /// Whether every page was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Documentation site ready to be generated.
pub struct Site {
    tree: PageTree,
    assembler: PageAssembler,
}

impl Site {
    /// Create a site, running the default preprocessors over `tree`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Tree` if preprocessing produces an invalid tree.
    pub fn new(tree: PageTree, config: &Config) -> Result<Self, GenerateError> {
        Self::with_preprocessors(tree, config, &default_preprocessors())
    }

    /// Create a site, running `preprocessors` in order over `tree`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Tree` if preprocessing produces an invalid tree.
    pub fn with_preprocessors(
        mut tree: PageTree,
        config: &Config,
        preprocessors: &[Box<dyn Preprocessor>],
    ) -> Result<Self, GenerateError> {
        for preprocessor in preprocessors {
            tree = preprocessor.process(tree)?;
            tracing::debug!(
                preprocessor = preprocessor.name(),
                pages = tree.len(),
                "Preprocessed page tree"
            );
        }

        let assembler = PageAssembler::new(
            TitleFormatter::new(config.hugo.clone()),
            config.menu.clone(),
        );
        Ok(Self { tree, assembler })
    }

    /// The preprocessed page tree.
    #[must_use]
    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    /// Output paths of the site's pages.
    #[must_use]
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.tree)
    }

    /// Render one page.
    ///
    /// Returns `None` for pages that produce no file.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::PageNotFound` for foreign ids and
    /// `GenerateError::Render` when the content cannot be rendered.
    pub fn render_page(&self, id: PageId) -> Result<Option<RenderedPage>, GenerateError> {
        self.render_with(&self.paths(), id)
    }

    /// Render all pages and write them to `sink`.
    ///
    /// A page that fails to render is logged, recorded in the report and
    /// skipped; the other pages are still written.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Io` if the sink fails to write a file.
    pub fn generate(&self, sink: &mut dyn OutputSink) -> Result<GenerationReport, GenerateError> {
        let resolver = self.paths();
        let ids: Vec<PageId> = self.tree.ids().collect();

        let results: Vec<(PageId, Result<Option<RenderedPage>, GenerateError>)> = ids
            .par_iter()
            .map(|&id| (id, self.render_with(&resolver, id)))
            .collect();

        let mut report = GenerationReport::default();
        for (id, result) in results {
            match result {
                Ok(Some(rendered)) => {
                    sink.write(&rendered.path, &rendered.content)
                        .map_err(|source| GenerateError::Io {
                            path: rendered.path.clone(),
                            source,
                        })?;
                    tracing::debug!(path = %rendered.path, "Wrote page");
                    report.written.push(rendered.path);
                }
                Ok(None) => {}
                Err(error) => {
                    let key = self.tree.page(id).key.clone();
                    tracing::error!(page = %key, error = %error, "Failed to render page");
                    report.failed.push(PageFailure { key, error });
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "Generated site"
        );
        Ok(report)
    }

    fn render_with(
        &self,
        resolver: &PathResolver<'_>,
        id: PageId,
    ) -> Result<Option<RenderedPage>, GenerateError> {
        let page = self.tree.get(id).ok_or(GenerateError::PageNotFound(id))?;
        let render_error = |source: RenderError| GenerateError::Render {
            page: page.key.clone(),
            source,
        };

        let content = match &page.body {
            PageBody::Nothing => return Ok(None),
            PageBody::Raw(text) => text.clone(),
            PageBody::Content(node) => {
                let mut body = String::with_capacity(4096);
                let items = breadcrumbs(resolver, id).map_err(render_error)?;
                render_breadcrumbs::<HugoBackend>(&items, &mut body);

                let links = |key: &str| resolver.resolve_key(id, key);
                let rendered = ContentRenderer::<HugoBackend>::new(&links)
                    .render(node)
                    .map_err(render_error)?;
                body.push_str(&rendered);

                self.assembler.assemble(page, &body)?
            }
        };

        Ok(Some(RenderedPage {
            path: resolver.resolve(id).to_owned(),
            content,
        }))
    }
}
