//! Shared utility functions for content rendering.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::Hash;

/// Whether a link address points outside the generated site.
///
/// Any address carrying a scheme separator is external.
#[must_use]
pub fn is_external(address: &str) -> bool {
    address.contains("://")
}

/// Relative path from one output file to another.
///
/// Both paths are `/`-separated with no leading slash; the link is taken
/// from the directory holding `from`.
///
/// # Examples
///
/// ```
/// use hugodoc_renderer::relative_path;
///
/// assert_eq!(relative_path("pkg/_index.md", "pkg/-foo.md"), "-foo.md");
/// assert_eq!(relative_path("pkg/-foo/_index.md", "pkg/_index.md"), "../_index.md");
/// assert_eq!(relative_path("", "pkg/_index.md"), "pkg/_index.md");
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let mut dir: Vec<&str> = from.split('/').collect();
    dir.pop();
    let target: Vec<&str> = to.split('/').collect();

    let shared = dir.iter().zip(&target).take_while(|(a, b)| a == b).count();
    let mut parts = vec![".."; dir.len() - shared];
    parts.extend(&target[shared..]);
    parts.join("/")
}

/// Escape a link label so its brackets cannot end the link early.
pub(crate) fn escape_label(label: &str) -> Cow<'_, str> {
    if !label.contains(['[', ']', '\\']) {
        return Cow::Borrowed(label);
    }
    let mut out = String::with_capacity(label.len() + 2);
    for c in label.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Group items by key, keeping groups in first-seen order.
pub(crate) fn group_by_key<K, T>(items: impl IntoIterator<Item = (K, T)>) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for (key, item) in items {
        if let Some(&i) = index.get(&key) {
            groups[i].1.push(item);
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key, vec![item]));
        }
    }
    groups
}
