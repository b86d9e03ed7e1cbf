//! Console output that stays readable for CJK text.

use std::io::Write;

/// Prints the given parts joined by a single space, followed by a newline.
///
/// Never returns an error and never panics: if the write fails (a console
/// that cannot take the bytes, a closed pipe), the line is retried with
/// every non-ASCII character replaced by `?`, and a second failure is
/// swallowed.
pub fn safe_print<I, S>(parts: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = parts
        .into_iter()
        .map(|p| p.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ");
    write_line(&line);
}

fn write_line(line: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if writeln!(out, "{line}").is_err() {
        let lossy: String = line
            .chars()
            .map(|c| if c.is_ascii() { c } else { '?' })
            .collect();
        let _ = writeln!(out, "{lossy}");
    }
    let _ = out.flush();
}

/// Display width of a string in terminal columns. CJK and other non-ASCII
/// characters occupy two columns, everything else one.
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| if (c as u32) > 0x7F { 2 } else { 1 }).sum()
}

/// Renders rows as an aligned text grid.
///
/// Column widths are the maximum display width of any cell in the column.
/// The first row is treated as a header and gets its own separator line
/// when more rows follow.
pub fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(empty sheet)".to_string();
    }

    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut separator = String::from("+");
    for w in &widths {
        separator.push_str(&"-".repeat(w + 2));
        separator.push('+');
    }

    let mut lines = vec![separator.clone()];
    for (row_idx, row) in rows.iter().enumerate() {
        let mut line = String::from("|");
        for (col_idx, width) in widths.iter().enumerate() {
            let cell = row.get(col_idx).map(String::as_str).unwrap_or("");
            let padding = width - display_width(cell);
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
            line.push_str(" |");
        }
        lines.push(line);
        if row_idx == 0 && rows.len() > 1 {
            lines.push(separator.clone());
        }
    }
    lines.push(separator);
    lines.join("\n")
}
