use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("The survey file {path} does not exist.")]
    InputNotFound { path: String },

    #[error("Unsupported file format for {path}. Allowed extensions: {allowed}")]
    UnsupportedFormat { path: String, allowed: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Format,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::UnsupportedFormat { .. }
            | EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::InputNotFound { .. } => ErrorCategory::Input,
            EtlError::CsvError(_)
            | EtlError::SpreadsheetError(_)
            | EtlError::XlsxWriteError(_)
            | EtlError::SerializationError(_) => ErrorCategory::Format,
            EtlError::ProcessingError { .. } => ErrorCategory::Processing,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Format | ErrorCategory::Processing => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { .. } => format!("Error: {}", self),
            _ => format!("Error during conversion: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "檢查輸入/輸出副檔名 (.xlsx, .xls, .csv, .tsv) 與設定檔內容"
            }
            ErrorCategory::Input => "確認 --input 指向的問卷檔案存在",
            ErrorCategory::Format => "確認檔案是有效的試算表或 CSV，且第一列為欄位標題",
            ErrorCategory::Processing => "使用 --verbose 重新執行以查看詳細日誌",
            ErrorCategory::System => "檢查檔案權限與磁碟空間",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = EtlError::InputNotFound {
            path: "SurveyResponse.xlsx".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Error: The survey file SurveyResponse.xlsx does not exist."
        );
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_unsupported_format_is_configuration_error() {
        let err = EtlError::UnsupportedFormat {
            path: "survey.json".to_string(),
            allowed: "xlsx, xls, csv, tsv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Error during conversion:"));
        assert!(err.to_string().contains("xlsx, xls, csv, tsv"));
    }

    #[test]
    fn test_serialization_error_is_format_error() {
        let err: EtlError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Format);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: EtlError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
