use super::{render_cell, Table};
use crate::domain::model::{CellValue, EmpathyRecord, OUTPUT_COLUMNS};
use crate::utils::error::{EtlError, Result};
use csv::{ReaderBuilder, WriterBuilder};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn read(bytes: &[u8], delimiter: u8) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(row.iter().map(CellValue::from_raw).collect::<Vec<_>>());
    }

    Ok(Table::from_rows(headers, rows))
}

pub fn write(records: &[EmpathyRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row().iter().map(render_cell))?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transformer::RecordTransformer;

    #[test]
    fn test_read_quoted_multiline_headers() {
        let csv = "\u{feff}\"How much do you trust? \n(Scale: 1 = Not at all)\",Name\n3,Alice\n,Bob\n";
        let table = read(csv.as_bytes(), b',').unwrap();

        assert_eq!(table.headers[0], "How much do you trust? \n(Scale: 1 = Not at all)");
        assert_eq!(table.records.len(), 2);
        assert_eq!(
            table.records[0].get("How much do you trust? \n(Scale: 1 = Not at all)"),
            Some(&CellValue::Number(3.0))
        );
        assert_eq!(table.records[0].get("Name"), Some(&CellValue::text("Alice")));
        assert_eq!(
            table.records[1].get("How much do you trust? \n(Scale: 1 = Not at all)"),
            Some(&CellValue::Absent)
        );
    }

    #[test]
    fn test_read_null_tokens_as_absent() {
        let table = read(b"gender,features\nNA,NaN\nnull,Mobile alerts\n", b',').unwrap();

        assert_eq!(table.records[0].get("gender"), Some(&CellValue::Absent));
        assert_eq!(table.records[0].get("features"), Some(&CellValue::Absent));
        assert_eq!(table.records[1].get("gender"), Some(&CellValue::Absent));
        assert_eq!(table.records[1].get("features"), Some(&CellValue::text("Mobile alerts")));
    }

    #[test]
    fn test_read_tab_delimited() {
        let tsv = "a\tb\nx\t7\n";
        let table = read(tsv.as_bytes(), b'\t').unwrap();

        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.records[0].get("b"), Some(&CellValue::Number(7.0)));
    }

    #[test]
    fn test_read_header_only() {
        let table = read(b"a,b\n", b',').unwrap();
        assert_eq!(table.headers.len(), 2);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_write_header_and_empty_cells() {
        let transformer = RecordTransformer::default();
        let output = transformer.transform(&[crate::domain::model::Record::new()]);

        let bytes = write(&output, b',').unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.lines().next().unwrap();

        assert_eq!(first_line, OUTPUT_COLUMNS.join(","));
        assert!(text.contains("1,SimpleGov Survey,Respondent 1,N/A,Citizen,N/A"));
    }
}
