use crate::adapters::tabular::TabularFormat;
use crate::config::mapping::{InterviewDefaults, SchemaMapping};
use crate::config::toml_config::TomlConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};

pub const DEFAULT_INPUT_PATH: &str = "SurveyResponse.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "Empathy_Interview_Data.xlsx";

/// 合併命令列與設定檔之後的最終配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: Option<String>,
    pub columns: SchemaMapping,
    pub interview: InterviewDefaults,
}

impl RunConfig {
    pub fn new(input_path: impl Into<String>, output_path: Option<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path,
            columns: SchemaMapping::default(),
            interview: InterviewDefaults::default(),
        }
    }

    /// 優先順序：命令列 > 設定檔 > 預設值。`persist = false` 時不寫檔
    pub fn resolve(
        cli_input: Option<String>,
        cli_output: Option<String>,
        persist: bool,
        file: Option<TomlConfig>,
    ) -> Self {
        let file = file.unwrap_or_default();

        let input_path = cli_input
            .or_else(|| file.input_path().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_INPUT_PATH.to_string());

        let output_path = if persist {
            Some(
                cli_output
                    .or_else(|| file.output_path().map(str::to_string))
                    .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            )
        } else {
            None
        };

        Self {
            input_path,
            output_path,
            columns: file.columns,
            interview: file.interview,
        }
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn columns(&self) -> &SchemaMapping {
        &self.columns
    }

    fn interview(&self) -> &InterviewDefaults {
        &self.interview
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        TabularFormat::for_input(&self.input_path)?;

        if let Some(output) = &self.output_path {
            validate_path("output", output)?;
            TabularFormat::for_output(output)?;
        }

        let as_file = TomlConfig {
            input: None,
            output: None,
            interview: self.interview.clone(),
            columns: self.columns.clone(),
        };
        as_file.validate_config()
    }
}
