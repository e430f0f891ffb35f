//! Render backend trait for format-specific output.
//!
//! This trait abstracts the differences between plain GitHub-flavored
//! markdown and Hugo content files, allowing the content renderer to be
//! generic over the output format.

use std::fmt::Write;

use crate::content::SourceSet;
use crate::util::{escape_label, is_external};

/// Backend trait for format-specific rendering operations.
///
/// Default implementations produce GitHub-flavored markdown. Backends
/// override the pieces their target engine treats differently:
/// - Code blocks (default language)
/// - Links (Hugo resolves internal links with `relref`)
/// - Tables (Hugo needs HTML tables to keep markdown inside cells)
pub trait RenderBackend {
    /// Language tag for code blocks that declare none.
    const DEFAULT_CODE_LANGUAGE: Option<&'static str> = None;

    /// Render a table.
    ///
    /// The renderer pads `header` and every row to the same width before
    /// calling this, so all slices have equal length.
    fn table(header: &[String], rows: &[Vec<String>], out: &mut String);

    /// Render a link to a page generated in the same run.
    ///
    /// `address` is already resolved relative to the current page.
    fn internal_link(address: &str, label: &str, out: &mut String) {
        write!(out, "[{}]({address})", escape_label(label)).unwrap();
    }

    /// Render a link to an external URL.
    fn external_link(address: &str, label: &str, out: &mut String) {
        write!(out, "[{}]({address})", escape_label(label)).unwrap();
    }

    /// Render a link, choosing the external form when `address` has a scheme.
    fn link(address: &str, label: &str, out: &mut String) {
        if is_external(address) {
            Self::external_link(address, label, out);
        } else {
            Self::internal_link(address, label, out);
        }
    }

    /// Render a fenced code block.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        let lang = lang
            .filter(|l| !l.is_empty())
            .or(Self::DEFAULT_CODE_LANGUAGE)
            .unwrap_or_default();
        write!(out, "```{lang}\n{content}").unwrap();
        if !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
    }

    /// Render inline code.
    fn code_inline(content: &str, out: &mut String) {
        write!(out, "`{content}`").unwrap();
    }

    /// Render strong emphasis.
    fn strong(content: &str, out: &mut String) {
        write!(out, "**{content}**").unwrap();
    }

    /// Render a heading.
    fn header(level: u8, content: &str, out: &mut String) {
        let level = usize::from(level.clamp(1, 6));
        write!(out, "{} {content}\n\n", "#".repeat(level)).unwrap();
    }

    /// Render one list item.
    ///
    /// `number` is `Some` for ordered lists.
    fn list_item(number: Option<usize>, content: &str, out: &mut String) {
        match number {
            Some(n) => writeln!(out, "{n}. {content}").unwrap(),
            None => writeln!(out, "- {content}").unwrap(),
        }
    }

    /// Render a label naming the source sets a piece of content applies to.
    fn source_set_label(source_sets: &[&SourceSet], out: &mut String) {
        out.push('[');
        for (i, source_set) in source_sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(source_set.name());
        }
        out.push(']');
    }

    /// Render a line break.
    fn line_break(out: &mut String) {
        out.push('\n');
    }

    /// Render a paragraph separator.
    fn paragraph_break(out: &mut String) {
        out.push_str("\n\n");
    }
}
