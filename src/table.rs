//! Static table output for `lin table`.

use crate::data::Issue;
use crate::text::{display_width, ellipsize, pad_right};

const HEADERS: [&str; 3] = ["ID", "TITLE", "URL"];

/// Titles longer than this are cut with an ellipsis.
pub const MAX_TITLE_WIDTH: usize = 60;

fn row_cells(issue: &Issue) -> [String; 3] {
    [
        issue.identifier.clone(),
        ellipsize(&issue.title, MAX_TITLE_WIDTH),
        issue.url.clone().unwrap_or_default(),
    ]
}

fn separator(widths: &[usize; 3]) -> String {
    let mut line = String::from("+");
    for w in widths {
        line.push_str(&"-".repeat(w + 2));
        line.push('+');
    }
    line
}

fn row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let mut line = String::from("|");
    for (cell, w) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(&pad_right(cell, *w));
        line.push_str(" |");
    }
    line
}

/// Render issues as a bordered table, one separator after every row.
pub fn render_table(issues: &[Issue]) -> String {
    let header = HEADERS.map(str::to_string);
    let rows: Vec<[String; 3]> = issues.iter().map(row_cells).collect();

    let mut widths = header.clone().map(|h| display_width(&h));
    for cells in &rows {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(display_width(cell));
        }
    }

    let sep = separator(&widths);
    let mut out = vec![sep.clone(), row(&header, &widths), sep.clone()];
    for cells in &rows {
        out.push(row(cells, &widths));
        out.push(sep.clone());
    }
    out.join("\n")
}
