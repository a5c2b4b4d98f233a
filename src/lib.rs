pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::mapping::{InterviewDefaults, SchemaMapping};
pub use crate::config::toml_config::TomlConfig;
pub use crate::config::RunConfig;
pub use crate::core::{
    etl::{EtlEngine, EtlReport},
    pipeline::SurveyPipeline,
    transformer::{get_value, RecordTransformer},
};
pub use crate::domain::model::{CellValue, EmpathyRecord, Record, OUTPUT_COLUMNS, SENTINEL};
pub use crate::utils::error::{EtlError, Result};

/// 轉換單一問卷檔；`output_file` 為 `None` 時只回傳表格不寫檔
pub async fn convert_survey_to_empathy_format(
    survey_file: &str,
    output_file: Option<&str>,
) -> Result<Vec<EmpathyRecord>> {
    let config = RunConfig::new(survey_file, output_file.map(str::to_string));
    let pipeline = SurveyPipeline::new(LocalStorage::default(), config);
    let report = EtlEngine::new(pipeline).run().await?;
    Ok(report.records)
}
