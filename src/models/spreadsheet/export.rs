use rust_xlsxwriter::{Format, Workbook};

use super::{COLUMNS, ExportError, SHEET_NAME};
use crate::models::program::EventItem;

/// Rows of the downloadable starter workbook.
const STARTER_ROWS: [(&str, u32); 3] = [("개식사", 5), ("국민의례", 10), ("환영사", 15)];

/// Column widths, in characters.
const COLUMN_WIDTHS: [f64; 3] = [24.0, 14.0, 48.0];

/// Write `items` as a single-sheet workbook: header row, then one row per
/// item in list order. Empty details are left as blank cells.
pub fn export_items(items: &[EventItem]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *name, &header_format)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, item) in items.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &item.label)?;
        sheet.write_number(row, 1, item.duration_minutes)?;
        if !item.detail.is_empty() {
            sheet.write_string(row, 2, &item.detail)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// The blank template offered for download before any upload.
pub fn starter_workbook() -> Result<Vec<u8>, ExportError> {
    let rows: Vec<EventItem> = STARTER_ROWS
        .iter()
        .map(|(label, minutes)| EventItem::new(*label, *minutes, ""))
        .collect();
    export_items(&rows)
}
