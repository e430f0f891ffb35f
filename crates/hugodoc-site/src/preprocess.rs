//! Page tree transformations applied before rendering.

use std::fmt::Write;

use crate::tree::{Page, PageBody, PageId, PageKind, PageTree, PageTreeBuilder, TreeError};

/// Name of the package list artifact written next to each module.
pub const PACKAGE_LIST_NAME: &str = "package-list";

/// Transforms the page tree before rendering.
///
/// Preprocessors run in registration order; each receives the output of the
/// previous one.
pub trait Preprocessor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Transform the tree.
    ///
    /// # Errors
    ///
    /// Returns `TreeError` if the transformed tree would be invalid.
    fn process(&self, tree: PageTree) -> Result<PageTree, TreeError>;
}

/// Places every top-level page under a single synthetic root.
///
/// The root has an empty name and key and is not written.
pub struct RootCreator;

impl Preprocessor for RootCreator {
    fn name(&self) -> &'static str {
        "root-creator"
    }

    fn process(&self, tree: PageTree) -> Result<PageTree, TreeError> {
        if let [root] = tree.roots()
            && tree.page(*root).kind == PageKind::Root
        {
            return Ok(tree);
        }

        let mut builder = PageTreeBuilder::new();
        let root = builder.add_page(Page::new("", "", PageKind::Root, PageBody::Nothing), None)?;
        builder.append_tree(tree, Some(root))?;
        Ok(builder.build())
    }
}

/// Link format named in package lists. Consumers of external documentation
/// links only accept recognized format names.
const LINK_FORMAT: &str = "jekyll-v1";

/// Adds a `package-list` resource under every module page.
///
/// The list names the module's packages, sorted, in the format consumed by
/// external documentation links.
pub struct PackageListCreator;

impl PackageListCreator {
    /// Content of the package list for the given package names.
    #[must_use]
    pub fn package_list<'a>(packages: impl IntoIterator<Item = &'a str>) -> String {
        let mut names: Vec<&str> = packages.into_iter().collect();
        names.sort_unstable();
        names.dedup();

        let mut out = format!("$dokka.format:{LINK_FORMAT}\n$dokka.linkExtension:md\n\n");
        for name in names {
            writeln!(out, "{name}").unwrap();
        }
        out
    }
}

impl Preprocessor for PackageListCreator {
    fn name(&self) -> &'static str {
        "package-list-creator"
    }

    fn process(&self, tree: PageTree) -> Result<PageTree, TreeError> {
        let lists: Vec<_> = tree
            .iter()
            .filter(|(_, page)| page.kind == PageKind::Module)
            .map(|(id, module)| {
                let packages = module_packages(&tree, id);
                let page = Page::new(
                    PACKAGE_LIST_NAME,
                    format!("{}/{PACKAGE_LIST_NAME}", module.key),
                    PageKind::Resource,
                    PageBody::Raw(Self::package_list(packages)),
                );
                (id, page)
            })
            .collect();

        let mut builder = PageTreeBuilder::from(tree);
        for (module, page) in lists {
            builder.add_page(page, Some(module))?;
        }
        Ok(builder.build())
    }
}

/// Names of the package pages below a module, stopping at nested modules.
fn module_packages(tree: &PageTree, module: PageId) -> Vec<&str> {
    let mut packages = Vec::new();
    let mut stack: Vec<_> = tree.children(module).to_vec();
    while let Some(id) = stack.pop() {
        let page = tree.page(id);
        match page.kind {
            PageKind::Package => packages.push(page.name.as_str()),
            PageKind::Module => {}
            _ => stack.extend_from_slice(tree.children(id)),
        }
    }
    packages
}

/// Preprocessors run by default, in order.
#[must_use]
pub fn default_preprocessors() -> Vec<Box<dyn Preprocessor>> {
    vec![Box::new(RootCreator), Box::new(PackageListCreator)]
}
