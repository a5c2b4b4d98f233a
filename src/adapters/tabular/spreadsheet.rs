use super::{render_cell, Table};
use crate::domain::model::{CellValue, EmpathyRecord, OUTPUT_COLUMNS};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Cursor;

fn to_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) if f.is_nan() => CellValue::Absent,
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from_text(s),
        Data::Bool(b) => CellValue::text(if *b { "True" } else { "False" }),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::text(cell.to_string())),
        Data::DurationIso(s) => CellValue::text(s),
        // Empty 與公式錯誤
        _ => CellValue::Absent,
    }
}

/// 讀取第一個工作表，第一列為欄位標題
pub fn read(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EtlError::ProcessingError {
            message: "Workbook contains no worksheets".to_string(),
        })??;
    tracing::debug!("Reading worksheet {:?} ({:?})", sheet_name, range.get_size());

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
        None => return Ok(Table::default()),
    };

    let mut skipped = 0;
    let cells: Vec<Vec<CellValue>> = rows
        .filter(|row| {
            let blank = row.iter().all(is_blank);
            if blank {
                skipped += 1;
            }
            !blank
        })
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    if skipped > 0 {
        tracing::warn!("Skipped {} empty row(s) in worksheet {:?}", skipped, sheet_name);
    }

    Ok(Table::from_rows(headers, cells))
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn write(records: &[EmpathyRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    let wrap_format = Format::new().set_text_wrap();

    for (col, name) in OUTPUT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1).map_err(|_| EtlError::ProcessingError {
            message: format!("Too many rows for a worksheet: {}", records.len()),
        })?;

        for (col, cell) in record.to_row().iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                CellValue::Absent => {}
                CellValue::Text(s) if s.is_empty() => {}
                CellValue::Text(s) if s.contains('\n') => {
                    worksheet.write_string_with_format(row, col, s, &wrap_format)?;
                }
                other => {
                    worksheet.write_string(row, col, render_cell(other))?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
