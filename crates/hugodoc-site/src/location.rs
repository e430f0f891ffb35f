//! Output file layout.
//!
//! Every page is written to a path built from the names of its ancestors.
//! Pages with children become `_index.md` of their own directory so Hugo
//! nests the children beneath them; leaves are `<name>.md` files.

use std::sync::LazyLock;

use hugodoc_renderer::{RenderError, relative_path};
use regex::Regex;

use crate::tree::{PageId, PageKind, PageTree};

/// File name of a page that has children.
pub const INDEX_FILENAME: &str = "_index.md";

/// Extension of page files.
pub const PAGE_EXTENSION: &str = ".md";

/// Names that cannot be used as file names on some systems or clash with
/// Hugo's index pages.
const RESERVED_NAMES: &[&str] = &[
    "index", "con", "aux", "lst", "prn", "nul", "eof", "inp", "out",
];

/// Characters that are not allowed in file names on some systems, or that
/// would split a name into several path segments.
const RESERVED_CHARS: &[char] = &['|', '>', '<', '*', ':', '"', '?', '%', '/', '\\'];

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").unwrap());

/// Turn a page name into a file-system safe, case-insensitive name.
///
/// # Examples
///
/// ```
/// use hugodoc_site::identifier_to_filename;
///
/// assert_eq!(identifier_to_filename("FooBar"), "-foo-bar");
/// assert_eq!(identifier_to_filename("List<T>"), "-list---t--");
/// assert_eq!(identifier_to_filename("index"), "--index--");
/// assert_eq!(identifier_to_filename(".."), "--..--");
/// assert_eq!(identifier_to_filename(""), "--root--");
/// ```
#[must_use]
pub fn identifier_to_filename(name: &str) -> String {
    if name.is_empty() {
        return "--root--".to_owned();
    }
    let name = UPPERCASE_RE
        .replace_all(name, |caps: &regex::Captures<'_>| {
            format!("-{}", caps[0].to_lowercase())
        })
        .into_owned();
    if RESERVED_NAMES.contains(&name.as_str()) {
        format!("--{name}--")
    } else {
        sanitize_segment(&name)
    }
}

/// Make `name` a single path segment: reserved characters become `--` and
/// the relative segments `.` and `..` are wrapped like reserved names.
fn sanitize_segment(name: &str) -> String {
    match name {
        "." | ".." => format!("--{name}--"),
        _ => name.replace(RESERVED_CHARS, "--"),
    }
}

/// Output paths of every page in a tree, and links between them.
///
/// Paths are computed once at construction and have no leading slash. A
/// `Root` page with children maps to the output directory itself; every
/// other root page gets a directory named after it.
pub struct PathResolver<'a> {
    tree: &'a PageTree,
    paths: Vec<String>,
}

impl<'a> PathResolver<'a> {
    /// Compute the output path of every page in `tree`.
    #[must_use]
    pub fn new(tree: &'a PageTree) -> Self {
        let mut dirs: Vec<String> = Vec::with_capacity(tree.len());
        let mut paths = Vec::with_capacity(tree.len());

        // Ids are in insertion order, so a parent's directory is known
        // before any of its children is visited.
        for (id, page) in tree.iter() {
            let parent_dir = tree.parent(id).map(|p| dirs[p.index()].as_str());

            // Only a synthetic root with children owns the top level.
            let dir = match parent_dir {
                None if page.kind == PageKind::Root && tree.has_children(id) => String::new(),
                None => identifier_to_filename(&page.name),
                Some(parent_dir) => join(parent_dir, &identifier_to_filename(&page.name)),
            };

            let path = if page.kind == PageKind::Resource {
                join(parent_dir.unwrap_or_default(), &sanitize_segment(&page.name))
            } else if tree.has_children(id) {
                join(&dir, INDEX_FILENAME)
            } else {
                format!("{dir}{PAGE_EXTENSION}")
            };

            dirs.push(dir);
            paths.push(path);
        }

        Self { tree, paths }
    }

    /// The page tree the paths were computed for.
    #[must_use]
    pub fn tree(&self) -> &'a PageTree {
        self.tree
    }

    /// Output path of a page.
    ///
    /// # Panics
    ///
    /// Panics if `page` was not issued for the resolver's tree.
    #[must_use]
    pub fn resolve(&self, page: PageId) -> &str {
        &self.paths[page.index()]
    }

    /// Relative path from the file of `from` to the file of `to`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnresolvedReference` if either page is not part
    /// of the tree or `to` is not navigable.
    pub fn resolve_link(&self, from: PageId, to: PageId) -> Result<String, RenderError> {
        let from_path = self
            .paths
            .get(from.index())
            .ok_or_else(|| RenderError::UnresolvedReference(from.to_string()))?;
        let target = self
            .tree
            .get(to)
            .filter(|page| page.is_navigable())
            .ok_or_else(|| RenderError::UnresolvedReference(to.to_string()))?;
        let to_path = &self.paths[to.index()];

        tracing::trace!(from = %from_path, to = %to_path, key = %target.key, "Resolved link");
        Ok(relative_path(from_path, to_path))
    }

    /// Relative path from the file of `from` to the page addressed by `key`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnresolvedReference` naming `key` if no
    /// navigable page has that key.
    pub fn resolve_key(&self, from: PageId, key: &str) -> Result<String, RenderError> {
        let to = self
            .tree
            .find_by_key(key)
            .ok_or_else(|| RenderError::UnresolvedReference(key.to_owned()))?;
        self.resolve_link(from, to)
            .map_err(|_| RenderError::UnresolvedReference(key.to_owned()))
    }

    /// The page followed by its ancestors up to the root.
    #[must_use]
    pub fn ancestors(&self, page: PageId) -> Vec<PageId> {
        self.tree.ancestors(page)
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Page, PageBody, PageTreeBuilder};
    use hugodoc_renderer::ContentNode;
    use pretty_assertions::assert_eq;

    fn page(name: &str, key: &str, kind: PageKind) -> Page {
        Page::content(name, key, kind, ContentNode::text(name))
    }

    struct Fixture {
        tree: PageTree,
        root: PageId,
        module: PageId,
        package: PageId,
        class: PageId,
        function: PageId,
        list: PageId,
    }

    fn fixture() -> Fixture {
        let mut b = PageTreeBuilder::new();
        let root = b
            .add_page(Page::new("", "", PageKind::Root, PageBody::Nothing), None)
            .unwrap();
        let module = b.add_page(page("app", "app", PageKind::Module), Some(root)).unwrap();
        let package = b
            .add_page(page("com.example", "pkg", PageKind::Package), Some(module))
            .unwrap();
        let class = b
            .add_page(page("FooBar", "pkg/FooBar", PageKind::Classlike), Some(package))
            .unwrap();
        let function = b
            .add_page(page("run", "pkg/FooBar/run", PageKind::Member), Some(class))
            .unwrap();
        let list = b
            .add_page(
                Page::new(
                    "package-list",
                    "app/package-list",
                    PageKind::Resource,
                    PageBody::Raw(String::new()),
                ),
                Some(module),
            )
            .unwrap();
        Fixture {
            tree: b.build(),
            root,
            module,
            package,
            class,
            function,
            list,
        }
    }

    #[test]
    fn test_identifier_to_filename() {
        assert_eq!(identifier_to_filename("com.example"), "com.example");
        assert_eq!(identifier_to_filename("FooBar"), "-foo-bar");
        assert_eq!(identifier_to_filename("Map<K, V>"), "-map---k, -v--");
        assert_eq!(identifier_to_filename("aux"), "--aux--");
        assert_eq!(identifier_to_filename("Index"), "-index");
        assert_eq!(identifier_to_filename(""), "--root--");
    }

    #[test]
    fn test_identifier_to_filename_reserved_characters() {
        assert_eq!(identifier_to_filename("say\"hi"), "say--hi");
        assert_eq!(identifier_to_filename("a/b"), "a--b");
        assert_eq!(identifier_to_filename("a\\b"), "a--b");
        assert_eq!(identifier_to_filename("x:y|z"), "x--y--z");
        assert_eq!(identifier_to_filename("what?*"), "what----");
        assert_eq!(identifier_to_filename("50%"), "50--");
    }

    #[test]
    fn test_identifier_to_filename_relative_segments() {
        assert_eq!(identifier_to_filename("."), "--.--");
        assert_eq!(identifier_to_filename(".."), "--..--");
        assert_eq!(identifier_to_filename("..."), "...");
        assert_eq!(identifier_to_filename("com.example"), "com.example");
    }

    #[test]
    fn test_children_stay_below_parent() {
        let mut b = PageTreeBuilder::new();
        let module = b.add_page(page("app", "app", PageKind::Module), None).unwrap();
        let dots = b.add_page(page("..", "app/dots", PageKind::Package), Some(module)).unwrap();
        let inner = b
            .add_page(page("..", "app/dots/dots", PageKind::Classlike), Some(dots))
            .unwrap();
        let quoted = b
            .add_page(page("say\"hi", "app/dots/quoted", PageKind::Classlike), Some(dots))
            .unwrap();
        let tree = b.build();
        let resolver = PathResolver::new(&tree);

        assert_eq!(resolver.resolve(dots), "app/--..--/_index.md");
        assert_eq!(resolver.resolve(inner), "app/--..--/--..--.md");
        assert_eq!(resolver.resolve(quoted), "app/--..--/say--hi.md");
        for id in tree.ids() {
            let path = resolver.resolve(id);
            assert!(path.split('/').all(|s| s != ".." && s != "."), "{path}");
        }
        assert_eq!(resolver.resolve_link(inner, quoted).unwrap(), "say--hi.md");
    }

    #[test]
    fn test_sibling_roots_get_own_directories() {
        let mut b = PageTreeBuilder::new();
        let first = b.add_page(page("app", "app", PageKind::Module), None).unwrap();
        let second = b.add_page(page("lib", "lib", PageKind::Module), None).unwrap();
        let a = b.add_page(page("a", "app/a", PageKind::Package), Some(first)).unwrap();
        let c = b.add_page(page("a", "lib/a", PageKind::Package), Some(second)).unwrap();
        let tree = b.build();
        let resolver = PathResolver::new(&tree);

        assert_eq!(resolver.resolve(first), "app/_index.md");
        assert_eq!(resolver.resolve(second), "lib/_index.md");
        assert_eq!(resolver.resolve(a), "app/a.md");
        assert_eq!(resolver.resolve(c), "lib/a.md");
    }

    #[test]
    fn test_resolve_paths() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        assert_eq!(resolver.resolve(f.root), "_index.md");
        assert_eq!(resolver.resolve(f.module), "app/_index.md");
        assert_eq!(resolver.resolve(f.package), "app/com.example/_index.md");
        assert_eq!(resolver.resolve(f.class), "app/com.example/-foo-bar/_index.md");
        assert_eq!(resolver.resolve(f.function), "app/com.example/-foo-bar/run.md");
        assert_eq!(resolver.resolve(f.list), "app/package-list");
    }

    #[test]
    fn test_index_suffix_only_for_pages_with_children() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        for id in f.tree.ids() {
            if f.tree.page(id).kind == PageKind::Resource {
                continue;
            }
            let path = resolver.resolve(id);
            assert_eq!(
                path.ends_with(INDEX_FILENAME),
                f.tree.has_children(id),
                "{path}"
            );
        }
    }

    #[test]
    fn test_leaf_root_is_not_an_index() {
        let mut b = PageTreeBuilder::new();
        let only = b.add_page(page("Solo", "solo", PageKind::Module), None).unwrap();
        let tree = b.build();

        assert_eq!(PathResolver::new(&tree).resolve(only), "-solo.md");
    }

    #[test]
    fn test_resolve_link_between_pages() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        assert_eq!(resolver.resolve_link(f.function, f.package).unwrap(), "../_index.md");
        assert_eq!(
            resolver.resolve_link(f.package, f.function).unwrap(),
            "-foo-bar/run.md"
        );
        assert_eq!(resolver.resolve_link(f.class, f.list).unwrap(), "../../package-list");
    }

    #[test]
    fn test_resolve_link_to_non_navigable_page() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        let err = resolver.resolve_link(f.module, f.root).unwrap_err();

        assert!(matches!(err, RenderError::UnresolvedReference(_)));
    }

    #[test]
    fn test_resolve_key() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        assert_eq!(resolver.resolve_key(f.function, "pkg/FooBar").unwrap(), "_index.md");
        assert_eq!(
            resolver.resolve_key(f.function, "nowhere").unwrap_err(),
            RenderError::UnresolvedReference("nowhere".to_owned())
        );
    }

    #[test]
    fn test_ancestors() {
        let f = fixture();
        let resolver = PathResolver::new(&f.tree);

        assert_eq!(
            resolver.ancestors(f.class),
            vec![f.class, f.package, f.module, f.root]
        );
    }
}
