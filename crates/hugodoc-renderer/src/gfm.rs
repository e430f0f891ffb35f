//! GitHub-flavored markdown backend.

use std::fmt::Write;

use crate::backend::RenderBackend;

/// Plain GitHub-flavored markdown backend.
///
/// Uses the trait defaults for everything except tables, which become pipe
/// tables.
pub struct GfmBackend;

impl RenderBackend for GfmBackend {
    fn table(header: &[String], rows: &[Vec<String>], out: &mut String) {
        if header.is_empty() {
            return;
        }

        write_pipe_row(header, out);
        out.push('|');
        for _ in header {
            out.push_str("---|");
        }
        out.push('\n');
        for row in rows {
            write_pipe_row(row, out);
        }
    }
}

fn write_pipe_row(cells: &[String], out: &mut String) {
    out.push('|');
    for cell in cells {
        write!(out, " {} |", escape_cell(cell)).unwrap();
    }
    out.push('\n');
}

/// Keep a cell on one line and protect column separators.
fn escape_cell(cell: &str) -> String {
    cell.trim().replace('|', "\\|").replace('\n', " ")
}
