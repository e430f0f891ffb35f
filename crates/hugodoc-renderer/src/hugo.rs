//! Hugo backend for content rendering.
//!
//! Produces markdown for Hugo content directories:
//! - Internal links go through `relref` so Hugo resolves them at build time
//! - Code blocks without a language are tagged `java`
//! - Tables are emitted as HTML with markdown-enabled cells

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::util::escape_label;

/// Opening raw-passthrough shortcode: Hugo renders the wrapped text as markdown.
pub const MARKDOWN_START: &str = "{{% md %}}";
/// Closing raw-passthrough shortcode.
pub const MARKDOWN_END: &str = "{{% /md %}}";

/// Hugo render backend.
pub struct HugoBackend;

impl RenderBackend for HugoBackend {
    const DEFAULT_CODE_LANGUAGE: Option<&'static str> = Some("java");

    fn internal_link(address: &str, label: &str, out: &mut String) {
        write!(out, r#"[{}]({{{{< relref "{address}" >}}}})"#, escape_label(label)).unwrap();
    }

    // Inline code is emitted without backticks. Kept until the intended
    // output for Hugo pages is confirmed.
    fn code_inline(content: &str, out: &mut String) {
        out.push_str(content);
    }

    fn table(header: &[String], rows: &[Vec<String>], out: &mut String) {
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("<table>\n<thead>\n<tr>\n");
        for cell in header {
            writeln!(out, "<th>{}</th>", cell.trim()).unwrap();
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        for row in rows {
            out.push_str("<tr>\n");
            for cell in row {
                writeln!(out, "<td>{MARKDOWN_START}{}{MARKDOWN_END}</td>", cell.trim()).unwrap();
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
    }
}
