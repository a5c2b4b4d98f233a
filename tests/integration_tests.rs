use anyhow::Result;
use empathy_etl::adapters::tabular::{read_table, TabularFormat};
use empathy_etl::{
    convert_survey_to_empathy_format, CellValue, EmpathyRecord, EtlEngine, EtlError,
    LocalStorage, RunConfig, SchemaMapping, SurveyPipeline, TomlConfig, OUTPUT_COLUMNS,
};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use tempfile::TempDir;

/// 依欄位對應產生一份問卷 CSV，未指定的欄位留空
fn survey_csv(rows: &[Vec<(&str, &str)>]) -> Result<Vec<u8>> {
    let mapping = SchemaMapping::default();
    let entries = mapping.entries();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(entries.iter().map(|(_, header)| *header))?;
    for row in rows {
        writer.write_record(entries.iter().map(|(name, _)| {
            row.iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| *value)
                .unwrap_or("")
        }))?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

fn path_str(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_end_to_end_csv_to_xlsx() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "SurveyResponse.csv");
    let output = path_str(&temp_dir, "Empathy_Interview_Data.xlsx");

    let csv = survey_csv(&[
        vec![
            ("timestamp", "2023-05-01T10:00:00.000Z"),
            ("gender", "Female"),
            ("age", "29"),
            ("location", "CA"),
            ("voted", "Yes"),
            ("transparency", "Not at all"),
            ("conflict_concern", "9"),
            ("trust", "2"),
            ("corporate_donations", "No"),
            ("prioritize_frequency", "Always"),
            ("app_likelihood", "8"),
            ("desired_features", "Mobile alerts"),
            ("knows_representatives", "Yes"),
        ],
        vec![
            ("timestamp", "yesterday"),
            ("trust", "9"),
            ("corporate_donations", "Only with strict regulations"),
            ("knows_representatives", "No"),
        ],
        vec![],
    ])?;
    tokio::fs::write(&input, csv).await?;

    let records = convert_survey_to_empathy_format(&input, Some(output.as_str())).await?;

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let first = &records[0];
    assert_eq!(first.date, "05/01/2023");
    assert_eq!(first.gender, CellValue::text("Female"));
    assert_eq!(first.demographic, "Age: 29, Location: CA, Voter: Yes");
    assert_eq!(first.direct_quotes.lines().count(), 4);
    assert_eq!(
        first.pain_points,
        [
            "Lack of transparency in campaign/political funding",
            "High concern about politicians' conflicts of interest",
            "Low trust in representatives to act in public interest",
            "Believes politicians often prioritize financial incentives over public interest",
        ]
        .join("\n")
    );
    assert_eq!(
        first.opportunities,
        [
            "High interest in using political transparency app",
            "Wants app features: Mobile alerts",
            "Already knows their representatives - engaged citizen",
        ]
        .join("\n")
    );

    let second = &records[1];
    assert_eq!(second.date, "N/A");
    assert_eq!(
        second.direct_quotes,
        [
            "\"I have strong trust in my representatives to act in my best interest.\"",
            "\"Corporate donations to politicians should only be allowed with strict regulations.\"",
        ]
        .join("\n")
    );
    assert_eq!(second.opportunities, "Opportunity to educate about representatives");

    let third = &records[2];
    assert_eq!(third.gender, CellValue::text("N/A"));
    assert_eq!(third.demographic, "Age: N/A, Location: N/A, Voter: N/A");
    assert!(third.direct_quotes.is_empty());
    assert!(third.interview_notes.contains("- Trust in representatives: N/A"));

    // 讀回輸出檔，11 欄內容完全一致
    let bytes = tokio::fs::read(&output).await?;
    let table = read_table(&bytes, TabularFormat::Xlsx)?;
    assert_eq!(table.headers, OUTPUT_COLUMNS.to_vec());
    let restored: Vec<EmpathyRecord> = table
        .records
        .iter()
        .filter_map(EmpathyRecord::from_record)
        .collect();
    assert_eq!(restored, records);

    Ok(())
}

#[tokio::test]
async fn test_csv_output_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "survey.csv");
    let output = path_str(&temp_dir, "empathy.csv");

    let csv = survey_csv(&[vec![
        ("gender", "Male"),
        ("age", "35"),
        ("transparency", "Mostly insufficient"),
        ("conflict_concern", "N/A"),
        ("trust", "4"),
        ("prioritize_frequency", "Often"),
        ("changed_opinion", "Yes"),
    ]])?;
    tokio::fs::write(&input, csv).await?;

    let records = convert_survey_to_empathy_format(&input, Some(output.as_str())).await?;

    assert_eq!(
        records[0].pain_points,
        [
            "Lack of transparency in campaign/political funding",
            "Low trust in representatives to act in public interest",
            "Believes politicians often prioritize financial incentives over public interest",
        ]
        .join("\n")
    );

    let bytes = tokio::fs::read(&output).await?;
    let table = read_table(&bytes, TabularFormat::Csv)?;
    let restored: Vec<EmpathyRecord> = table
        .records
        .iter()
        .filter_map(EmpathyRecord::from_record)
        .collect();
    assert_eq!(restored, records);

    Ok(())
}

#[tokio::test]
async fn test_csv_null_tokens_become_sentinel() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "survey.csv");

    let csv = survey_csv(&[vec![
        ("gender", "NA"),
        ("age", "null"),
        ("desired_features", "NaN"),
        ("knows_representatives", "None"),
    ]])?;
    tokio::fs::write(&input, csv).await?;

    let records = convert_survey_to_empathy_format(&input, None).await?;

    assert_eq!(records[0].gender, CellValue::text("N/A"));
    assert_eq!(records[0].demographic, "Age: N/A, Location: N/A, Voter: N/A");
    assert!(records[0].interview_notes.contains("- Desired app features: N/A"));
    assert!(records[0].opportunities.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_xlsx_input_with_native_dates() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "survey.xlsx");
    let mapping = SchemaMapping::default();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
    worksheet.write_string(0, 0, mapping.timestamp.as_str())?;
    worksheet.write_string(0, 1, mapping.trust.as_str())?;
    worksheet.write_string(0, 2, mapping.app_likelihood.as_str())?;
    let timestamp = ExcelDateTime::from_ymd(2024, 3, 9)?.and_hms(14, 5, 0)?;
    worksheet.write_datetime_with_format(1, 0, &timestamp, &date_format)?;
    worksheet.write_number(1, 1, 3)?;
    worksheet.write_string(1, 2, "7")?;
    workbook.save(&input)?;

    let records = convert_survey_to_empathy_format(&input, None).await?;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, "03/09/2024");
    assert_eq!(
        records[0].direct_quotes,
        "\"I have very little trust that my representatives act in my best interest.\""
    );
    // 文字型的 "7" 不參與數值比較
    assert!(records[0].opportunities.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_missing_input_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "SurveyResponse.xlsx");
    let output = path_str(&temp_dir, "out.xlsx");

    let err = convert_survey_to_empathy_format(&input, Some(output.as_str()))
        .await
        .unwrap_err();

    assert!(matches!(err, EtlError::InputNotFound { .. }));
    assert!(err.user_friendly_message().contains("does not exist"));
    assert!(!std::path::Path::new(&output).exists());

    Ok(())
}

#[tokio::test]
async fn test_unsupported_input_extension() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "survey.json");
    tokio::fs::write(&input, b"[]").await?;

    let err = convert_survey_to_empathy_format(&input, None).await.unwrap_err();

    assert!(matches!(err, EtlError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("xlsx, xls, csv, tsv"));

    Ok(())
}

#[tokio::test]
async fn test_toml_column_override() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = path_str(&temp_dir, "renamed.tsv");
    let output = path_str(&temp_dir, "renamed_out.tsv");

    tokio::fs::write(
        &input,
        "Timestamp\tTrust level\tGender\n2023-11-20T08:15:30.250Z\t1\tNon-binary\n",
    )
    .await?;

    let file_config = TomlConfig::from_toml_str(&format!(
        r#"
[input]
path = "{}"

[output]
path = "{}"

[interview]
interviewer_name = "Research Team"

[columns]
timestamp = "Timestamp"
trust = "Trust level"
gender = "Gender"
"#,
        input.replace('\\', "/"),
        output.replace('\\', "/")
    ))?;

    let config = RunConfig::resolve(None, None, true, Some(file_config));
    let pipeline = SurveyPipeline::new(LocalStorage::default(), config);
    let report = EtlEngine::new(pipeline).run().await?;

    assert_eq!(report.record_count(), 1);
    assert!(report.output_path.is_some());

    let record = &report.records[0];
    assert_eq!(record.interviewer_name, "Research Team");
    assert_eq!(record.date, "11/20/2023");
    assert_eq!(record.gender, CellValue::text("Non-binary"));
    assert!(record.pain_points.contains("Low trust in representatives"));

    let written = tokio::fs::read_to_string(&output).await?;
    assert!(written.starts_with("#\tInterviewer Name (Team Member)\t"));

    Ok(())
}
