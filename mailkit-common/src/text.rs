//! Small text helpers shared by the mailto builder and its callers.

use std::sync::LazyLock;

use regex::Regex;

/// Local-part `@` domain, where the domain has at least one dot. `%` is left
/// out of the local part: addresses go into a URI unencoded.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+$")
        .expect("email address pattern is valid")
});

/// Checks whether `address` looks like a conventional email address.
///
/// This is purely syntactic: no DNS lookup or mailbox verification happens.
pub fn is_valid_email_address(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// Replaces the five HTML special characters with their entity references.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders rows of cells as a plain-text table.
///
/// Each column is left-aligned and padded to its widest cell. Rows shorter
/// than the widest row are padded with empty cells.
///
/// ```
/// use mailkit_common::text::as_formatted_table;
///
/// let table = as_formatted_table(&[vec!["a", "bb"], vec!["ccc", ""]]);
/// assert_eq!(table, "| a   | bb |\n| ccc |    |\n");
/// ```
pub fn as_formatted_table<R, C>(rows: &[R]) -> String
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let columns = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
            *width = (*width).max(cell.as_ref().chars().count());
        }
    }

    let mut table = String::new();
    for row in rows {
        let row = row.as_ref();
        table.push('|');
        for (column, width) in widths.iter().enumerate() {
            let cell = row.get(column).map_or("", AsRef::as_ref);
            table.push(' ');
            table.push_str(cell);
            table.extend(std::iter::repeat_n(' ', width - cell.chars().count()));
            table.push_str(" |");
        }
        table.push('\n');
    }
    table
}
