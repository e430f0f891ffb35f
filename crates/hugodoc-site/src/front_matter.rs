//! Hugo front matter.
//!
//! Every page file starts with a TOML block between `+++` lines:
//!
//! ```toml
//! +++
//! title = "Foo"
//! draft = false
//! toc = false
//! type = "reference"
//! +++
//! ```
//!
//! Package-index pages additionally get a `linktitle` and a menu entry.

use std::collections::BTreeMap;

use hugodoc_config::MenuConfig;
use serde::Serialize;

use crate::GenerateError;
use crate::title::TitleFormatter;
use crate::tree::{Page, PageKind};

/// Line opening and closing the front matter block.
pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Hugo content type of every generated page.
pub const PAGE_TYPE: &str = "reference";

#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: String,
    draft: bool,
    toc: bool,
    #[serde(rename = "type")]
    page_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    linktitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    menu: Option<BTreeMap<&'a str, MenuEntry<'a>>>,
}

#[derive(Debug, Serialize)]
struct MenuEntry<'a> {
    parent: &'a str,
    weight: u32,
}

/// Wraps rendered page bodies with front matter.
#[derive(Clone, Debug, Default)]
pub struct PageAssembler {
    formatter: TitleFormatter,
    menu: MenuConfig,
}

impl PageAssembler {
    #[must_use]
    pub fn new(formatter: TitleFormatter, menu: MenuConfig) -> Self {
        Self { formatter, menu }
    }

    /// Title formatter used for the `title` and `linktitle` fields.
    #[must_use]
    pub fn formatter(&self) -> &TitleFormatter {
        &self.formatter
    }

    /// Produce the file content for `page`: front matter, a blank line,
    /// then `body`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::FrontMatter` if the metadata cannot be
    /// serialized.
    pub fn assemble(&self, page: &Page, body: &str) -> Result<String, GenerateError> {
        let is_package_index = page.kind == PageKind::PackageIndex;
        let front_matter = FrontMatter {
            title: self.formatter.title(&page.name),
            draft: false,
            toc: false,
            page_type: PAGE_TYPE,
            linktitle: is_package_index.then(|| self.formatter.link_title(&page.name)),
            menu: is_package_index.then(|| {
                BTreeMap::from([(
                    self.menu.name.as_str(),
                    MenuEntry {
                        parent: &self.menu.parent,
                        weight: self.menu.weight,
                    },
                )])
            }),
        };
        let metadata = toml::to_string(&front_matter)?;

        let mut out = String::with_capacity(metadata.len() + body.len() + 16);
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push('\n');
        out.push_str(&metadata);
        if !metadata.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(FRONT_MATTER_DELIMITER);
        out.push_str("\n\n");
        out.push_str(body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hugodoc_config::{HugoConfig, Replacements};
    use hugodoc_renderer::ContentNode;
    use pretty_assertions::assert_eq;

    /// Split file content into parsed front matter and body.
    fn split(content: &str) -> (toml::Table, &str) {
        let rest = content.strip_prefix("+++\n").unwrap();
        let (metadata, body) = rest.split_once("+++\n\n").unwrap();
        (toml::from_str(metadata).unwrap(), body)
    }

    fn page(name: &str, kind: PageKind) -> Page {
        Page::content(name, name, kind, ContentNode::text(name))
    }

    fn assembler() -> PageAssembler {
        let config = HugoConfig {
            title_replace: Some(Replacements::new().with("com.example.", "")),
            title_capitalize: true,
            link_title_replace: Some(Replacements::new().with("com.", "")),
            link_title_capitalize: false,
        };
        PageAssembler::new(TitleFormatter::new(config), MenuConfig::default())
    }

    #[test]
    fn test_regular_page() {
        let out = assembler()
            .assemble(&page("com.example.Foo", PageKind::Classlike), "Body\n")
            .unwrap();

        let (metadata, body) = split(&out);
        assert_eq!(body, "Body\n");
        assert_eq!(metadata["title"].as_str(), Some("Foo"));
        assert_eq!(metadata["draft"].as_bool(), Some(false));
        assert_eq!(metadata["toc"].as_bool(), Some(false));
        assert_eq!(metadata["type"].as_str(), Some("reference"));
        assert!(!metadata.contains_key("linktitle"));
        assert!(!metadata.contains_key("menu"));
    }

    #[test]
    fn test_package_index_page_has_menu() {
        let out = assembler()
            .assemble(&page("com.example.app", PageKind::PackageIndex), "")
            .unwrap();

        let (metadata, body) = split(&out);
        assert_eq!(body, "");
        assert_eq!(metadata["title"].as_str(), Some("App"));
        assert_eq!(metadata["linktitle"].as_str(), Some("example.app"));
        let entry = &metadata["menu"]["docs"];
        assert_eq!(entry["parent"].as_str(), Some("hw-security-reference"));
        assert_eq!(entry["weight"].as_integer(), Some(1));
    }

    #[test]
    fn test_first_level_content_page_has_no_menu() {
        let out = assembler()
            .assemble(&page("com.example", PageKind::Package), "")
            .unwrap();

        let (metadata, _) = split(&out);
        assert!(!metadata.contains_key("menu"));
    }

    #[test]
    fn test_custom_menu() {
        let menu = MenuConfig {
            name: "api".to_owned(),
            parent: "reference".to_owned(),
            weight: 7,
        };
        let assembler = PageAssembler::new(TitleFormatter::default(), menu);

        let out = assembler
            .assemble(&page("lib", PageKind::PackageIndex), "")
            .unwrap();

        let (metadata, _) = split(&out);
        assert_eq!(metadata["menu"]["api"]["parent"].as_str(), Some("reference"));
        assert_eq!(metadata["menu"]["api"]["weight"].as_integer(), Some(7));
    }

    #[test]
    fn test_title_is_escaped() {
        let out = PageAssembler::default()
            .assemble(&page(r#"say "hi" \ bye"#, PageKind::Member), "")
            .unwrap();

        let (metadata, _) = split(&out);
        assert_eq!(metadata["title"].as_str(), Some(r#"say "hi" \ bye"#));
    }

    #[test]
    fn test_layout() {
        let out = PageAssembler::default()
            .assemble(&page("foo", PageKind::Member), "text")
            .unwrap();

        assert!(out.starts_with("+++\ntitle = \"foo\"\n"));
        assert!(out.ends_with("+++\n\ntext"));
    }
}
