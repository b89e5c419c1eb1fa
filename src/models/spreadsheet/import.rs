use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::{COLUMN_DETAIL, COLUMN_DURATION, COLUMN_LABEL, COLUMNS, ImportError};
use crate::models::program::{EventItem, MAX_DURATION_MINUTES};

/// Column positions of the required headers within the sheet.
struct ColumnMap {
    label: usize,
    duration: usize,
    detail: usize,
}

impl ColumnMap {
    fn locate(header: &[Data]) -> Result<Self, ImportError> {
        let find = |name: &str| header.iter().position(|cell| cell_text(cell) == name);

        match (find(COLUMN_LABEL), find(COLUMN_DURATION), find(COLUMN_DETAIL)) {
            (Some(label), Some(duration), Some(detail)) => Ok(ColumnMap { label, duration, detail }),
            _ => {
                let missing: Vec<&str> =
                    COLUMNS.iter().copied().filter(|c| find(c).is_none()).collect();
                Err(ImportError::Format(format!("missing columns: {}", missing.join(", "))))
            }
        }
    }
}

/// Parse an uploaded workbook into program items.
///
/// Only the first sheet is read. Columns are located by header name and
/// extra columns are ignored. Rows whose three required cells are blank
/// are skipped; a blank detail cell becomes an empty string.
pub fn import_items(bytes: &[u8]) -> Result<Vec<EventItem>, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ImportError::Parse(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Parse("workbook contains no sheets".to_string()))?
        .map_err(|e| ImportError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    let columns = ColumnMap::locate(header)?;

    // 1-based sheet row of the first data row, for error messages.
    let first_data_row = range.start().map(|(row, _)| row as usize).unwrap_or(0) + 2;

    let mut items = Vec::new();
    for (offset, row) in rows.enumerate() {
        let cell = |col: usize| row.get(col).unwrap_or(&Data::Empty);
        let label = cell_text(cell(columns.label));
        let duration = cell(columns.duration);
        let detail = cell_text(cell(columns.detail));

        if label.trim().is_empty() && is_blank(duration) && detail.trim().is_empty() {
            continue;
        }

        let row_number = first_data_row + offset;
        if label.trim().is_empty() {
            return Err(ImportError::Format(format!(
                "row {row_number}: {COLUMN_LABEL} is empty"
            )));
        }
        let duration_minutes = parse_minutes(duration).ok_or_else(|| {
            ImportError::Format(format!(
                "row {row_number}: {COLUMN_DURATION} must be a whole number from 1 to {MAX_DURATION_MINUTES}, got '{}'",
                cell_text(duration)
            ))
        })?;

        items.push(EventItem::new(label, duration_minutes, detail));
    }

    Ok(items)
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text content of a cell. Whole floats render without a fraction so a
/// numeric label such as `1` does not come back as `1.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}

fn parse_minutes(cell: &Data) -> Option<u32> {
    let minutes = match cell {
        Data::Int(i) => u32::try_from(*i).ok()?,
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => *f as u32,
        Data::String(s) => {
            let s = s.trim();
            match s.parse::<u32>() {
                Ok(n) => n,
                Err(_) => {
                    let f = s.parse::<f64>().ok()?;
                    if f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                        return None;
                    }
                    f as u32
                }
            }
        }
        _ => return None,
    };
    (1..=MAX_DURATION_MINUTES).contains(&minutes).then_some(minutes)
}
