//! Page tree for a documentation site.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by indices. This provides:
//! - O(1) page key lookups via `key_index` `HashMap`
//! - O(d) ancestor walks where d is the page depth
//!
//! Children can only be attached to pages that already exist, so a parent
//! always has a smaller index than its children and the tree has no cycles.

use std::collections::HashMap;
use std::fmt;

use hugodoc_renderer::ContentNode;
use serde::Deserialize;

/// Index of a page inside a [`PageTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

impl PageId {
    /// Position of the page in the tree's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural role of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Root,
    Module,
    /// Page listing the packages of a module. Gets a menu entry.
    PackageIndex,
    Package,
    Classlike,
    Member,
    /// Ancillary artifact written under its bare name.
    Resource,
}

/// What gets written for a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBody {
    /// Content tree rendered to markdown with front matter.
    Content(ContentNode),
    /// Text written verbatim.
    Raw(String),
    /// Nothing is written and the page cannot be linked to.
    #[default]
    Nothing,
}

/// Documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Display name (e.g. "com.example.Foo").
    pub name: String,
    /// Unique address used by internal links.
    pub key: String,
    pub kind: PageKind,
    #[serde(default)]
    pub body: PageBody,
}

impl Page {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        kind: PageKind,
        body: PageBody,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            kind,
            body,
        }
    }

    /// Page rendered from a content tree.
    #[must_use]
    pub fn content(
        name: impl Into<String>,
        key: impl Into<String>,
        kind: PageKind,
        node: ContentNode,
    ) -> Self {
        Self::new(name, key, kind, PageBody::Content(node))
    }

    /// Whether the page produces a file that links may point to.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        !matches!(self.body, PageBody::Nothing)
    }
}

/// Page with its children, as handed over by a tree producer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PageSpec {
    #[serde(flatten)]
    pub page: Page,
    #[serde(default)]
    pub children: Vec<PageSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecInput {
    Many(Vec<PageSpec>),
    One(PageSpec),
}

/// Page tree construction error.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Two pages share a key.
    #[error("Duplicate page key: {0}")]
    DuplicateKey(String),
    /// Parent id does not belong to the tree being built.
    #[error("Unknown parent page: {0}")]
    UnknownParent(PageId),
    /// Serialized tree could not be parsed.
    #[error("Page tree parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable page tree with key lookups.
#[derive(Clone, Debug, Default)]
pub struct PageTree {
    pages: Vec<Page>,
    parents: Vec<Option<PageId>>,
    children: Vec<Vec<PageId>>,
    roots: Vec<PageId>,
    key_index: HashMap<String, PageId>,
}

impl PageTree {
    #[must_use]
    pub fn builder() -> PageTreeBuilder {
        PageTreeBuilder::new()
    }

    /// Build a tree from nested page specs, in document order.
    pub fn from_specs(specs: Vec<PageSpec>) -> Result<Self, TreeError> {
        let mut builder = PageTreeBuilder::new();
        for spec in specs {
            builder.add_spec(spec, None)?;
        }
        Ok(builder.build())
    }

    /// Parse a tree from JSON: a single nested page or a list of them.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let specs = match serde_json::from_str(json)? {
            SpecInput::Many(specs) => specs,
            SpecInput::One(spec) => vec![spec],
        };
        Self::from_specs(specs)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0)
    }

    /// Page by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued for this tree.
    #[must_use]
    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.0]
    }

    #[must_use]
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parents.get(id.0).copied().flatten()
    }

    #[must_use]
    pub fn children(&self, id: PageId) -> &[PageId] {
        self.children.get(id.0).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has_children(&self, id: PageId) -> bool {
        !self.children(id).is_empty()
    }

    #[must_use]
    pub fn roots(&self) -> &[PageId] {
        &self.roots
    }

    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<PageId> {
        self.key_index.get(key).copied()
    }

    /// All page ids in insertion order (parents before children).
    pub fn ids(&self) -> impl Iterator<Item = PageId> + '_ {
        (0..self.pages.len()).map(PageId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageId, &Page)> + '_ {
        self.pages.iter().enumerate().map(|(i, page)| (PageId(i), page))
    }

    /// The page followed by its parent, grandparent, and so on up to the root.
    #[must_use]
    pub fn ancestors(&self, id: PageId) -> Vec<PageId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(i) = current {
            chain.push(i);
            current = self.parents[i.0];
        }
        chain
    }
}

/// Builder for [`PageTree`].
#[derive(Debug, Default)]
pub struct PageTreeBuilder {
    tree: PageTree,
}

impl PageTreeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page under `parent` (or as a root).
    ///
    /// # Returns
    ///
    /// Id of the added page.
    pub fn add_page(&mut self, page: Page, parent: Option<PageId>) -> Result<PageId, TreeError> {
        let tree = &mut self.tree;
        if let Some(parent) = parent
            && parent.0 >= tree.pages.len()
        {
            return Err(TreeError::UnknownParent(parent));
        }
        if tree.key_index.contains_key(&page.key) {
            return Err(TreeError::DuplicateKey(page.key));
        }

        let id = PageId(tree.pages.len());
        tree.key_index.insert(page.key.clone(), id);
        tree.pages.push(page);
        tree.children.push(Vec::new());
        tree.parents.push(parent);

        match parent {
            Some(parent) => tree.children[parent.0].push(id),
            None => tree.roots.push(id),
        }
        Ok(id)
    }

    /// Add a nested page spec, depth first.
    pub fn add_spec(&mut self, spec: PageSpec, parent: Option<PageId>) -> Result<PageId, TreeError> {
        let id = self.add_page(spec.page, parent)?;
        for child in spec.children {
            self.add_spec(child, Some(id))?;
        }
        Ok(id)
    }

    /// Move every page of `tree` into this builder, attaching its roots under `parent`.
    pub fn append_tree(&mut self, tree: PageTree, parent: Option<PageId>) -> Result<(), TreeError> {
        let mut remap: Vec<PageId> = Vec::with_capacity(tree.pages.len());
        for (page, old_parent) in tree.pages.into_iter().zip(tree.parents) {
            let new_parent = old_parent.map(|p| remap[p.0]).or(parent);
            remap.push(self.add_page(page, new_parent)?);
        }
        Ok(())
    }

    /// Build the [`PageTree`] instance.
    #[must_use]
    pub fn build(self) -> PageTree {
        self.tree
    }
}

impl From<PageTree> for PageTreeBuilder {
    fn from(tree: PageTree) -> Self {
        Self { tree }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(name: &str, kind: PageKind) -> Page {
        Page::content(name, name, kind, ContentNode::text(name))
    }

    #[test]
    fn test_add_page_returns_sequential_ids() {
        let mut builder = PageTreeBuilder::new();

        let a = builder.add_page(page("a", PageKind::Module), None).unwrap();
        let b = builder.add_page(page("b", PageKind::Package), Some(a)).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
    }

    #[test]
    fn test_add_page_with_parent_links_child() {
        let mut builder = PageTreeBuilder::new();
        let module = builder.add_page(page("m", PageKind::Module), None).unwrap();
        let package = builder.add_page(page("p", PageKind::Package), Some(module)).unwrap();
        let tree = builder.build();

        assert_eq!(tree.roots(), &[module]);
        assert_eq!(tree.children(module), &[package]);
        assert_eq!(tree.parent(package), Some(module));
        assert_eq!(tree.parent(module), None);
        assert!(tree.has_children(module));
        assert!(!tree.has_children(package));
    }

    #[test]
    fn test_add_page_duplicate_key() {
        let mut builder = PageTreeBuilder::new();
        builder.add_page(page("a", PageKind::Module), None).unwrap();

        let err = builder.add_page(page("a", PageKind::Package), None).unwrap_err();

        assert!(matches!(err, TreeError::DuplicateKey(key) if key == "a"));
    }

    #[test]
    fn test_add_page_unknown_parent() {
        let mut builder = PageTreeBuilder::new();

        let err = builder
            .add_page(page("a", PageKind::Module), Some(PageId(3)))
            .unwrap_err();

        assert!(matches!(err, TreeError::UnknownParent(PageId(3))));
        assert_eq!(err.to_string(), "Unknown parent page: #3");
    }

    #[test]
    fn test_find_by_key() {
        let mut builder = PageTreeBuilder::new();
        builder.add_page(page("a", PageKind::Module), None).unwrap();
        let b = builder.add_page(page("b", PageKind::Module), None).unwrap();
        let tree = builder.build();

        assert_eq!(tree.find_by_key("b"), Some(b));
        assert_eq!(tree.find_by_key("missing"), None);
    }

    #[test]
    fn test_ancestors_from_page_to_root() {
        let mut builder = PageTreeBuilder::new();
        let m = builder.add_page(page("m", PageKind::Module), None).unwrap();
        let p = builder.add_page(page("p", PageKind::Package), Some(m)).unwrap();
        let c = builder.add_page(page("c", PageKind::Classlike), Some(p)).unwrap();
        let tree = builder.build();

        assert_eq!(tree.ancestors(c), vec![c, p, m]);
        assert_eq!(tree.ancestors(m), vec![m]);
        assert!(tree.ancestors(PageId(42)).is_empty());
    }

    #[test]
    fn test_get_foreign_id() {
        let tree = PageTree::default();
        assert!(tree.get(PageId(0)).is_none());
        assert!(tree.children(PageId(0)).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_is_navigable() {
        assert!(page("a", PageKind::Module).is_navigable());
        assert!(Page::new("r", "r", PageKind::Resource, PageBody::Raw(String::new())).is_navigable());
        assert!(!Page::new("", "", PageKind::Root, PageBody::Nothing).is_navigable());
    }

    #[test]
    fn test_append_tree_under_parent() {
        let mut inner = PageTreeBuilder::new();
        let m = inner.add_page(page("m", PageKind::Module), None).unwrap();
        inner.add_page(page("p", PageKind::Package), Some(m)).unwrap();
        inner.add_page(page("n", PageKind::Module), None).unwrap();
        let inner = inner.build();

        let mut builder = PageTreeBuilder::new();
        let root = builder
            .add_page(Page::new("", "", PageKind::Root, PageBody::Nothing), None)
            .unwrap();
        builder.append_tree(inner, Some(root)).unwrap();
        let tree = builder.build();

        let names = |ids: &[PageId]| -> Vec<String> {
            ids.iter().map(|&id| tree.page(id).name.clone()).collect()
        };
        assert_eq!(tree.roots(), &[root]);
        assert_eq!(names(tree.children(root)), vec!["m", "n"]);
        let m = tree.find_by_key("m").unwrap();
        assert_eq!(names(tree.children(m)), vec!["p"]);
    }

    #[test]
    fn test_from_json_nested() {
        let json = r#"
        {
            "name": "app",
            "key": "app",
            "kind": "module",
            "body": {"content": {"type": "text", "text": "Module app"}},
            "children": [
                {
                    "name": "com.example",
                    "key": "app/com.example",
                    "kind": "package",
                    "body": {"content": {"type": "text", "text": "Package"}},
                    "children": [
                        {"name": "Foo", "key": "app/com.example/Foo", "kind": "classlike"}
                    ]
                }
            ]
        }
        "#;

        let tree = PageTree::from_json(json).unwrap();

        assert_eq!(tree.len(), 3);
        let foo = tree.find_by_key("app/com.example/Foo").unwrap();
        let foo_page = tree.page(foo);
        assert_eq!(foo_page.kind, PageKind::Classlike);
        assert_eq!(foo_page.body, PageBody::Nothing);
        let package = tree.parent(foo).unwrap();
        assert_eq!(tree.page(package).name, "com.example");
        assert_eq!(
            tree.page(tree.roots()[0]).body,
            PageBody::Content(ContentNode::text("Module app"))
        );
    }

    #[test]
    fn test_from_json_list_of_roots() {
        let json = r#"[
            {"name": "a", "key": "a", "kind": "module"},
            {"name": "b", "key": "b", "kind": "module", "body": {"raw": "text"}}
        ]"#;

        let tree = PageTree::from_json(json).unwrap();

        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.page(tree.roots()[1]).body, PageBody::Raw("text".to_owned()));
    }

    #[test]
    fn test_from_json_invalid() {
        let err = PageTree::from_json(r#"{"name": "a"}"#).unwrap_err();
        assert!(matches!(err, TreeError::Parse(_)));
    }
}
