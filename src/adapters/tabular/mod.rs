// 試算表: calamine 讀、rust_xlsxwriter 寫；CSV/TSV: csv
pub mod delimited;
pub mod spreadsheet;

use crate::domain::model::{CellValue, EmpathyRecord, Record};
use crate::utils::error::Result;
use crate::utils::validation::validate_file_extension;
use std::collections::HashSet;
use std::path::Path;

pub const INPUT_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "csv", "tsv"];
pub const OUTPUT_EXTENSIONS: [&str; 3] = ["xlsx", "csv", "tsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Xlsx,
    Xls,
    Csv,
    Tsv,
}

impl TabularFormat {
    fn from_extension(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    pub fn for_input(path: &str) -> Result<Self> {
        validate_file_extension(path, &INPUT_EXTENSIONS)?;
        Ok(Self::from_extension(path).unwrap_or(Self::Xlsx))
    }

    /// `.xls` 只能讀不能寫
    pub fn for_output(path: &str) -> Result<Self> {
        validate_file_extension(path, &OUTPUT_EXTENSIONS)?;
        Ok(Self::from_extension(path).unwrap_or(Self::Xlsx))
    }

    fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xlsx | Self::Xls => None,
        }
    }
}

/// 整份讀入的表格，record 以第一列標題為 key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub(crate) fn from_rows<I>(raw_headers: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<CellValue>>,
    {
        let headers = dedupe_headers(raw_headers);
        let records: Vec<Record> = rows
            .into_iter()
            .map(|cells| {
                let mut cells = cells.into_iter();
                headers
                    .iter()
                    .map(|h| (h.clone(), cells.next().unwrap_or(CellValue::Absent)))
                    .collect::<Record>()
            })
            .collect();

        Self { headers, records }
    }
}

/// 重複的欄位標題加上 `.1`、`.2` 後綴，避免後面的欄位覆蓋前面的值
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .map(|header| {
            if seen.insert(header.clone()) {
                return header;
            }
            let mut n = 1;
            loop {
                let candidate = format!("{}.{}", header, n);
                if seen.insert(candidate.clone()) {
                    tracing::warn!("Duplicate column header {:?} renamed to {:?}", header, candidate);
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}

/// 儲存格轉成檔案中的文字，缺值與空字串都寫成空白
pub(crate) fn render_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Absent => String::new(),
        CellValue::Text(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn read_table(bytes: &[u8], format: TabularFormat) -> Result<Table> {
    let table = match format.delimiter() {
        Some(delimiter) => delimited::read(bytes, delimiter)?,
        None => spreadsheet::read(bytes)?,
    };
    tracing::debug!(
        "Read {} rows x {} columns as {:?}",
        table.records.len(),
        table.headers.len(),
        format
    );
    Ok(table)
}

pub fn write_table(records: &[EmpathyRecord], format: TabularFormat) -> Result<Vec<u8>> {
    let bytes = match format.delimiter() {
        Some(delimiter) => delimited::write(records, delimiter)?,
        None => spreadsheet::write(records)?,
    };
    tracing::debug!("Encoded {} records as {:?} ({} bytes)", records.len(), format, bytes.len());
    Ok(bytes)
}
