//! Page and menu title formatting.

use hugodoc_config::{HugoConfig, Replacements};

/// Apply literal replacements in dictionary order, then optionally
/// titlecase the first character.
///
/// # Examples
///
/// ```
/// use hugodoc_config::Replacements;
/// use hugodoc_site::format_title;
///
/// let replacements = Replacements::new().with("com.example.", "");
/// assert_eq!(format_title("com.example.Foo", Some(&replacements), false), "Foo");
/// assert_eq!(format_title("foo", None, true), "Foo");
/// ```
#[must_use]
pub fn format_title(raw: &str, replacements: Option<&Replacements>, capitalize: bool) -> String {
    let mut title = raw.to_owned();
    for (from, to) in replacements.into_iter().flat_map(Replacements::iter) {
        if !from.is_empty() {
            title = title.replace(from, to);
        }
    }
    if capitalize {
        capitalize_first(&title)
    } else {
        title
    }
}

/// Titlecase the first character when it is lowercase.
///
/// Digraphs such as `ǆ` have a titlecase form (`ǅ`) distinct from their
/// uppercase form; every other letter is uppercased, which may expand it
/// (`ß` becomes `SS`).
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => match titlecase_digraph(first) {
            Some(title) => std::iter::once(title).chain(chars).collect(),
            None => first.to_uppercase().chain(chars).collect(),
        },
        _ => text.to_owned(),
    }
}

/// Titlecase form of the Latin digraph letters, which come in
/// uppercase/titlecase/lowercase triples.
fn titlecase_digraph(c: char) -> Option<char> {
    match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    }
}

/// Formats page titles and menu link titles from a [`HugoConfig`].
#[derive(Clone, Debug, Default)]
pub struct TitleFormatter {
    config: HugoConfig,
}

impl TitleFormatter {
    #[must_use]
    pub fn new(config: HugoConfig) -> Self {
        Self { config }
    }

    /// Title shown on the page (`title` front matter field).
    #[must_use]
    pub fn title(&self, raw: &str) -> String {
        format_title(
            raw,
            self.config.title_replace.as_ref(),
            self.config.title_capitalize,
        )
    }

    /// Title shown in navigation menus (`linktitle` front matter field).
    #[must_use]
    pub fn link_title(&self, raw: &str) -> String {
        format_title(
            raw,
            self.config.link_title_replace.as_ref(),
            self.config.link_title_capitalize,
        )
    }
}
