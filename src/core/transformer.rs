use crate::config::mapping::{InterviewDefaults, SchemaMapping};
use crate::domain::model::{CellValue, EmpathyRecord, Record, SENTINEL};
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const DATE_FORMAT: &str = "%m/%d/%Y";

const QUOTE_NO_TRANSPARENCY: &str =
    "\"There is no transparency in campaign and candidate funding.\"";
const QUOTE_HIGH_CONFLICT_CONCERN: &str =
    "\"I am extremely concerned about conflicts of interest in politicians' financial investments.\"";
const QUOTE_LOW_TRUST: &str =
    "\"I have very little trust that my representatives act in my best interest.\"";
const QUOTE_HIGH_TRUST: &str =
    "\"I have strong trust in my representatives to act in my best interest.\"";
const QUOTE_NO_DONATIONS: &str =
    "\"Politicians should not be allowed to receive any donations from corporations or interest groups.\"";
const QUOTE_REGULATED_DONATIONS: &str =
    "\"Corporate donations to politicians should only be allowed with strict regulations.\"";

const PAIN_TRANSPARENCY: &str = "Lack of transparency in campaign/political funding";
const PAIN_CONFLICT: &str = "High concern about politicians' conflicts of interest";
const PAIN_LOW_TRUST: &str = "Low trust in representatives to act in public interest";
const PAIN_PRIORITIZE: &str =
    "Believes politicians often prioritize financial incentives over public interest";

const OPPORTUNITY_APP_INTEREST: &str = "High interest in using political transparency app";
const OPPORTUNITY_CHANGED_OPINION: &str =
    "Demonstrated willingness to change opinions based on financial disclosure information";
const OPPORTUNITY_ENGAGED: &str = "Already knows their representatives - engaged citizen";
const OPPORTUNITY_EDUCATE: &str = "Opportunity to educate about representatives";

/// 取值規則：欄位存在且非空才回傳原值，否則為缺值（顯示為 "N/A"）
pub fn get_value(record: &Record, key: &str) -> CellValue {
    match record.get(key) {
        Some(value) if !value.is_missing() => value.clone(),
        _ => CellValue::Absent,
    }
}

fn at_least(value: &CellValue, threshold: f64) -> bool {
    matches!(value, CellValue::Number(n) if *n >= threshold)
}

fn at_most(value: &CellValue, threshold: f64) -> bool {
    matches!(value, CellValue::Number(n) if *n <= threshold)
}

/// 解析 `2023-05-01T10:00:00.000Z` 格式的時間戳，小數秒為必要部分
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let (_, time) = raw.split_once('T')?;
    if !time.contains('.') {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}

/// 日期欄位轉成 MM/DD/YYYY，任何失敗都回傳 "N/A"
pub fn format_date(value: &CellValue) -> String {
    let parsed = match value {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Text(raw) => parse_timestamp(raw),
        CellValue::Number(_) | CellValue::Absent => None,
    };

    parsed
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| SENTINEL.to_string())
}

pub struct RecordTransformer {
    columns: SchemaMapping,
    interview: InterviewDefaults,
}

impl RecordTransformer {
    pub fn new(columns: SchemaMapping, interview: InterviewDefaults) -> Self {
        Self { columns, interview }
    }

    pub fn columns(&self) -> &SchemaMapping {
        &self.columns
    }

    /// 逐列轉換，輸出筆數與順序和輸入一致
    pub fn transform(&self, records: &[Record]) -> Vec<EmpathyRecord> {
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.transform_record(idx + 1, record))
            .collect()
    }

    pub fn transform_record(&self, sequence: usize, record: &Record) -> EmpathyRecord {
        let c = &self.columns;

        EmpathyRecord {
            sequence,
            interviewer_name: self.interview.interviewer_name.clone(),
            interviewee_name: format!("{} {}", self.interview.respondent_prefix, sequence),
            date: format_date(&get_value(record, &c.timestamp)),
            persona: self.interview.persona.clone(),
            gender: get_value(record, &c.gender).or_sentinel(),
            demographic: self.demographic(record),
            interview_notes: self.interview_notes(record),
            direct_quotes: self.direct_quotes(record).join("\n"),
            opportunities: self.opportunities(record).join("\n"),
            pain_points: self.pain_points(record).join("\n"),
        }
    }

    pub fn demographic(&self, record: &Record) -> String {
        let c = &self.columns;
        format!(
            "Age: {}, Location: {}, Voter: {}",
            get_value(record, &c.age),
            get_value(record, &c.location),
            get_value(record, &c.voted)
        )
    }

    pub fn interview_notes(&self, record: &Record) -> String {
        let c = &self.columns;
        let v = |key: &String| get_value(record, key);

        [
            "Stakeholder Thoughts:".to_string(),
            format!("- Cares about representatives' activity: {}", v(&c.care_about_activity)),
            format!("- Follows representatives: {}", v(&c.follow_representatives)),
            format!("- Concern about financial conflicts: {}", v(&c.conflict_concern)),
            format!("- Trust in representatives: {}", v(&c.trust)),
            format!("- Likelihood to use tracking app: {}", v(&c.app_likelihood)),
            format!("- Concern about lobbying influence: {}", v(&c.lobbying_concern)),
            String::new(),
            "Suggested Problem:".to_string(),
            format!("- Transparency concern: {}", v(&c.transparency)),
            format!("- Lobbying impact: {}", v(&c.lobbying_impact)),
            format!("- Opinion on corporate donations: {}", v(&c.corporate_donations)),
            format!("- Industries with most influence: {}", v(&c.influential_industries)),
            format!(
                "- Frequency of prioritizing financial incentives: {}",
                v(&c.prioritize_frequency)
            ),
            String::new(),
            "Suggested solution (optional):".to_string(),
            format!("- Information sources: {}", v(&c.information_sources)),
            format!("- Tracking methods: {}", v(&c.tracking_methods)),
            format!("- Desired app features: {}", v(&c.desired_features)),
            format!("- Additional desired information: {}", v(&c.additional_information)),
        ]
        .join("\n")
    }

    pub fn direct_quotes(&self, record: &Record) -> Vec<&'static str> {
        let c = &self.columns;
        let mut quotes = Vec::new();

        if get_value(record, &c.transparency).is_text("Not at all") {
            quotes.push(QUOTE_NO_TRANSPARENCY);
        }

        if at_least(&get_value(record, &c.conflict_concern), 8.0) {
            quotes.push(QUOTE_HIGH_CONFLICT_CONCERN);
        }

        let trust = get_value(record, &c.trust);
        if at_most(&trust, 3.0) {
            quotes.push(QUOTE_LOW_TRUST);
        } else if at_least(&trust, 8.0) {
            quotes.push(QUOTE_HIGH_TRUST);
        }

        let donations = get_value(record, &c.corporate_donations);
        if donations.is_text("No") {
            quotes.push(QUOTE_NO_DONATIONS);
        } else if donations.is_text("Only with strict regulations") {
            quotes.push(QUOTE_REGULATED_DONATIONS);
        }

        quotes
    }

    pub fn pain_points(&self, record: &Record) -> Vec<&'static str> {
        let c = &self.columns;
        let mut pain_points = Vec::new();

        let transparency = get_value(record, &c.transparency);
        if transparency.is_text("Not at all") || transparency.is_text("Mostly insufficient") {
            pain_points.push(PAIN_TRANSPARENCY);
        }

        // 門檻刻意與引述不同（引述 >= 8，痛點 >= 7）
        if at_least(&get_value(record, &c.conflict_concern), 7.0) {
            pain_points.push(PAIN_CONFLICT);
        }

        if at_most(&get_value(record, &c.trust), 4.0) {
            pain_points.push(PAIN_LOW_TRUST);
        }

        let priority = get_value(record, &c.prioritize_frequency);
        if priority.is_text("Always") || priority.is_text("Often") {
            pain_points.push(PAIN_PRIORITIZE);
        }

        pain_points
    }

    pub fn opportunities(&self, record: &Record) -> Vec<String> {
        let c = &self.columns;
        let mut opportunities = Vec::new();

        if at_least(&get_value(record, &c.app_likelihood), 7.0) {
            opportunities.push(OPPORTUNITY_APP_INTEREST.to_string());
        }

        if get_value(record, &c.changed_opinion).is_text("Yes") {
            opportunities.push(OPPORTUNITY_CHANGED_OPINION.to_string());
        }

        let features = get_value(record, &c.desired_features);
        if !features.is_sentinel() {
            opportunities.push(format!("Wants app features: {}", features));
        }

        let knows_reps = get_value(record, &c.knows_representatives);
        if knows_reps.is_text("Yes") {
            opportunities.push(OPPORTUNITY_ENGAGED.to_string());
        } else if knows_reps.is_text("No") {
            opportunities.push(OPPORTUNITY_EDUCATE.to_string());
        }

        opportunities
    }
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self::new(SchemaMapping::default(), InterviewDefaults::default())
    }
}
