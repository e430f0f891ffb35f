//! Breadcrumb navigation rendered at the top of every page.

use hugodoc_renderer::{RenderBackend, RenderError};

use crate::location::PathResolver;
use crate::tree::PageId;

/// Separator between breadcrumb items.
pub const BREADCRUMB_SEPARATOR: &str = " / ";

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// Relative link target. `None` for the current page and for pages
    /// that cannot be linked to.
    pub link: Option<String>,
}

/// Build breadcrumbs for a page, root first, ending with the page itself.
///
/// Unnamed ancestors (such as a synthetic root) are left out.
///
/// # Errors
///
/// Returns `RenderError::UnresolvedReference` if `page` is not part of the
/// resolver's tree.
pub fn breadcrumbs(
    resolver: &PathResolver<'_>,
    page: PageId,
) -> Result<Vec<BreadcrumbItem>, RenderError> {
    let tree = resolver.tree();
    if tree.get(page).is_none() {
        return Err(RenderError::UnresolvedReference(page.to_string()));
    }

    let mut items = Vec::new();
    for id in resolver.ancestors(page).into_iter().rev() {
        let ancestor = tree.page(id);
        if ancestor.name.is_empty() {
            continue;
        }
        let link = if id != page && ancestor.is_navigable() {
            Some(resolver.resolve_link(page, id)?)
        } else {
            None
        };
        items.push(BreadcrumbItem {
            title: ancestor.name.clone(),
            link,
        });
    }
    Ok(items)
}

/// Render breadcrumb items joined by [`BREADCRUMB_SEPARATOR`], followed by
/// a paragraph break.
pub fn render_breadcrumbs<B: RenderBackend>(items: &[BreadcrumbItem], out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(BREADCRUMB_SEPARATOR);
        }
        match &item.link {
            Some(link) => B::internal_link(link, &item.title, out),
            None => out.push_str(&item.title),
        }
    }
    B::paragraph_break(out);
}
