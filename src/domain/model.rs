use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 缺值時統一顯示的標記
pub const SENTINEL: &str = "N/A";

/// 讀檔時視為缺值的字串（與 pandas 預設的 NA 字串相同）
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 輸出表格的欄位順序
pub const OUTPUT_COLUMNS: [&str; 11] = [
    "#",
    "Interviewer Name (Team Member)",
    "Interviewee Name",
    "Date",
    "User Persona",
    "Gender (as needed)",
    "Other demographic breakdown",
    "Interview Notes",
    "Direct Quotes",
    "Opportunity",
    "Pain Points",
];

/// 單一儲存格的值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Absent,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// 讀取 CSV 儲存格：NA 字串為缺值，可解析的有限數字為數值
    pub fn from_raw(raw: &str) -> Self {
        if NA_TOKENS.contains(&raw) {
            return CellValue::Absent;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// 試算表的文字儲存格：NA 字串為缺值，其餘保持文字
    pub fn from_text(raw: &str) -> Self {
        if NA_TOKENS.contains(&raw) {
            CellValue::Absent
        } else {
            CellValue::text(raw)
        }
    }

    /// 空值、NaN 與空字串都視為缺值
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Absent => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(s) => s.is_empty(),
            CellValue::DateTime(_) => false,
        }
    }

    /// 缺值或字面上就是 "N/A" 的文字
    pub fn is_sentinel(&self) -> bool {
        match self {
            CellValue::Text(s) => s == SENTINEL,
            other => other.is_missing(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_text(&self, expected: &str) -> bool {
        matches!(self, CellValue::Text(s) if s == expected)
    }

    /// 將缺值換成 "N/A" 文字
    pub fn or_sentinel(self) -> Self {
        if self.is_missing() {
            CellValue::text(SENTINEL)
        } else {
            self
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) if n.is_nan() => f.write_str(SENTINEL),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) if s.is_empty() => f.write_str(SENTINEL),
            CellValue::Text(s) => f.write_str(s),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Absent => f.write_str(SENTINEL),
        }
    }
}

/// 一筆輸入資料：欄位標題對應儲存格
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub data: HashMap<String, CellValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.data.get(key)
    }
}

impl FromIterator<(String, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

/// 同理心訪談格式的一列輸出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpathyRecord {
    #[serde(rename = "#")]
    pub sequence: usize,
    #[serde(rename = "Interviewer Name (Team Member)")]
    pub interviewer_name: String,
    #[serde(rename = "Interviewee Name")]
    pub interviewee_name: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "User Persona")]
    pub persona: String,
    #[serde(rename = "Gender (as needed)")]
    pub gender: CellValue,
    #[serde(rename = "Other demographic breakdown")]
    pub demographic: String,
    #[serde(rename = "Interview Notes")]
    pub interview_notes: String,
    #[serde(rename = "Direct Quotes")]
    pub direct_quotes: String,
    #[serde(rename = "Opportunity")]
    pub opportunities: String,
    #[serde(rename = "Pain Points")]
    pub pain_points: String,
}

impl EmpathyRecord {
    /// 依 `OUTPUT_COLUMNS` 順序輸出儲存格
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Number(self.sequence as f64),
            CellValue::text(&self.interviewer_name),
            CellValue::text(&self.interviewee_name),
            CellValue::text(&self.date),
            CellValue::text(&self.persona),
            self.gender.clone(),
            CellValue::text(&self.demographic),
            CellValue::text(&self.interview_notes),
            CellValue::text(&self.direct_quotes),
            CellValue::text(&self.opportunities),
            CellValue::text(&self.pain_points),
        ]
    }

    /// 從讀回的輸出檔重建紀錄。
    /// 讀檔時 "N/A" 已變成缺值：必填欄位還原為 "N/A"，組合欄位還原為空字串
    pub fn from_record(record: &Record) -> Option<Self> {
        let text = |column: &str| match record.get(column) {
            None | Some(CellValue::Absent) => String::new(),
            Some(value) => value.to_string(),
        };
        let required = |column: &str| {
            record
                .get(column)
                .cloned()
                .unwrap_or(CellValue::Absent)
                .to_string()
        };

        let sequence = record.get(OUTPUT_COLUMNS[0])?.as_number()?;
        if sequence < 1.0 || sequence.fract() != 0.0 {
            return None;
        }

        Some(Self {
            sequence: sequence as usize,
            interviewer_name: required(OUTPUT_COLUMNS[1]),
            interviewee_name: required(OUTPUT_COLUMNS[2]),
            date: required(OUTPUT_COLUMNS[3]),
            persona: required(OUTPUT_COLUMNS[4]),
            gender: record
                .get(OUTPUT_COLUMNS[5])
                .cloned()
                .unwrap_or(CellValue::Absent)
                .or_sentinel(),
            demographic: required(OUTPUT_COLUMNS[6]),
            interview_notes: required(OUTPUT_COLUMNS[7]),
            direct_quotes: text(OUTPUT_COLUMNS[8]),
            opportunities: text(OUTPUT_COLUMNS[9]),
            pain_points: text(OUTPUT_COLUMNS[10]),
        })
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub processed_records: Vec<EmpathyRecord>,
    pub source_rows: usize,
}
