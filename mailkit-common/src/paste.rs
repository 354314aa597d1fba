//! Pasting tab-delimited text (as copied from a spreadsheet) into a table.
//!
//! The upper-left corner of the pasted block is aligned with the anchor
//! cell. Every bound and every target cell is checked before the first
//! write, so a rejected paste leaves the table untouched.

use crate::{error::PasteError, internal};

pub type Result<T> = std::result::Result<T, PasteError>;

/// The table a block of text is pasted into.
pub trait TableModel {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn is_cell_editable(&self, row: usize, column: usize) -> bool;

    fn set_value_at(&mut self, value: &str, row: usize, column: usize);
}

/// Size of a successfully pasted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteSummary {
    pub rows: usize,
    pub columns: usize,
    pub cells_written: usize,
}

/// Splits a line into cells. Trailing empty cells are dropped, but a line
/// always has at least one cell.
fn cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split('\t').collect();
    while cells.len() > 1 && cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    cells
}

/// Pastes `text` into `model` with its first cell at `(start_row, start_column)`.
///
/// # Errors
///
/// - [`PasteError::Empty`] if `text` has no lines
/// - [`PasteError::NotEnoughColumns`] / [`PasteError::NotEnoughRows`] if the
///   block does not fit
/// - [`PasteError::CellNotEditable`] for the first read-only target cell
pub fn paste<M: TableModel + ?Sized>(
    model: &mut M,
    start_row: usize,
    start_column: usize,
    text: &str,
) -> Result<PasteSummary> {
    let lines: Vec<Vec<&str>> = text.lines().map(cells).collect();
    if lines.is_empty() {
        return Err(PasteError::Empty);
    }

    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    match start_column.checked_add(columns) {
        Some(required) if required <= model.column_count() => {}
        required => {
            return Err(PasteError::NotEnoughColumns {
                required: required.unwrap_or(usize::MAX),
                available: model.column_count(),
            });
        }
    }

    match start_row.checked_add(lines.len()) {
        Some(required) if required <= model.row_count() => {}
        required => {
            return Err(PasteError::NotEnoughRows {
                required: required.unwrap_or(usize::MAX),
                available: model.row_count(),
            });
        }
    }

    // The block fits inside the table, so no index below can overflow.
    for (y, line) in lines.iter().enumerate() {
        for x in 0..line.len() {
            let (row, column) = (start_row + y, start_column + x);
            if !model.is_cell_editable(row, column) {
                return Err(PasteError::CellNotEditable { row, column });
            }
        }
    }

    let mut cells_written = 0;
    for (y, line) in lines.iter().enumerate() {
        for (x, value) in line.iter().enumerate() {
            model.set_value_at(value, start_row + y, start_column + x);
            cells_written += 1;
        }
    }

    internal!(
        level = DEBUG,
        "Pasted {} cells at row {}, column {}",
        cells_written,
        start_row,
        start_column
    );

    Ok(PasteSummary {
        rows: lines.len(),
        columns,
        cells_written,
    })
}

/// Pastes at the first selected row and column.
///
/// Returns `Ok(None)` without touching the table if nothing is selected.
///
/// # Errors
///
/// See [`paste`].
pub fn paste_at_selection<M: TableModel + ?Sized>(
    model: &mut M,
    selected_rows: &[usize],
    selected_columns: &[usize],
    text: &str,
) -> Result<Option<PasteSummary>> {
    let (Some(&row), Some(&column)) = (selected_rows.first(), selected_columns.first()) else {
        return Ok(None);
    };
    paste(model, row, column, text).map(Some)
}
