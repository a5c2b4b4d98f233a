use serde::{Deserialize, Serialize};

/// 邏輯欄位名稱 -> 問卷原始標題
/// 預設值保留原題目的換行與結尾空白，可由設定檔 `[columns]` 覆寫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaMapping {
    pub timestamp: String,
    pub gender: String,

    // Demographics
    pub age: String,
    pub location: String,
    pub voted: String,

    // Stakeholder thoughts
    pub care_about_activity: String,
    pub follow_representatives: String,
    pub conflict_concern: String,
    pub trust: String,
    pub app_likelihood: String,
    pub lobbying_concern: String,

    // Suggested problem
    pub transparency: String,
    pub lobbying_impact: String,
    pub corporate_donations: String,
    pub influential_industries: String,
    pub prioritize_frequency: String,

    // Suggested solution
    pub information_sources: String,
    pub tracking_methods: String,
    pub desired_features: String,
    pub additional_information: String,

    pub changed_opinion: String,
    pub knows_representatives: String,
}

impl Default for SchemaMapping {
    fn default() -> Self {
        Self {
            timestamp: "Horodateur".into(),
            gender: "What is your gender?".into(),
            age: "How old are you?".into(),
            location: "Where are you from? Please abbreviate (CA = California, FRA = France) ".into(),
            voted: "Did you vote in the most recent election?".into(),
            care_about_activity: "How much do you care about what your representatives do in Congress (e.g., their roll call votes)?\n(Scale: 1 = Not important, 10 = Extremely important)".into(),
            follow_representatives: "On a scale between 1 to 10  how closely do you follow your representatives' activities? \n(Scale: 1=Not at all, 10= Very closely)".into(),
            conflict_concern: "How concerned are you about politicians' financial investments and potential conflicts of interest? \n(Scale: 1=Not concerned at all, 10=Extremely concerned)".into(),
            trust: "How much do you trust your elected representatives to act in your best interest? \n(Scale: 1 = Not at all, 10 = Completely)".into(),
            app_likelihood: "How likely are you to use an app that tracks political lobbying and donations? (Scale: 1 = Not likely at all, 10 = Extremely likely)".into(),
            lobbying_concern: "On a scale from 1 to 10, how concerned are you about lobbying's influence on legislation? (Scale: 1 = Not at All, 10 = Extremely Concerned)".into(),
            transparency: "To what extent do you believe there is sufficient transparency in campaign, party, and candidate funding?".into(),
            lobbying_impact: "How significant do you believe lobbying's impact is on policy decisions?   (Scale: 1 = Not significant at all, 10 = Extremely significant)".into(),
            corporate_donations: "Do you believe politicians should be allowed to receive campaign donations from corporations or interest groups?".into(),
            influential_industries: "Which industries do you think exert the most influence over politicians? (Select up to 3) ".into(),
            prioritize_frequency: "How often do you think politicians prioritize financial incentives over public interest?".into(),
            information_sources: "Where do you typically find information about new political candidates? (Select all that apply)".into(),
            tracking_methods: "How do you track individual politicians' investments? (Select all that apply)".into(),
            desired_features: "Which features would you find most useful in an app about political transparency? (Select up to 3)".into(),
            additional_information: "What additional information would you like to see about your representatives in a political transparency app?".into(),
            changed_opinion: "Have you ever changed your opinion about a politician based on their financial ties to lobbyists?".into(),
            knows_representatives: "Do you know who your representatives are? (state, county) ".into(),
        }
    }
}

impl SchemaMapping {
    /// (邏輯名稱, 標題)，依宣告順序
    pub fn entries(&self) -> [(&'static str, &str); 22] {
        [
            ("timestamp", self.timestamp.as_str()),
            ("gender", self.gender.as_str()),
            ("age", self.age.as_str()),
            ("location", self.location.as_str()),
            ("voted", self.voted.as_str()),
            ("care_about_activity", self.care_about_activity.as_str()),
            ("follow_representatives", self.follow_representatives.as_str()),
            ("conflict_concern", self.conflict_concern.as_str()),
            ("trust", self.trust.as_str()),
            ("app_likelihood", self.app_likelihood.as_str()),
            ("lobbying_concern", self.lobbying_concern.as_str()),
            ("transparency", self.transparency.as_str()),
            ("lobbying_impact", self.lobbying_impact.as_str()),
            ("corporate_donations", self.corporate_donations.as_str()),
            ("influential_industries", self.influential_industries.as_str()),
            ("prioritize_frequency", self.prioritize_frequency.as_str()),
            ("information_sources", self.information_sources.as_str()),
            ("tracking_methods", self.tracking_methods.as_str()),
            ("desired_features", self.desired_features.as_str()),
            ("additional_information", self.additional_information.as_str()),
            ("changed_opinion", self.changed_opinion.as_str()),
            ("knows_representatives", self.knows_representatives.as_str()),
        ]
    }

    /// 不在 `headers` 中的對應欄位
    pub fn missing_from<'a>(&'a self, headers: &[String]) -> Vec<(&'static str, &'a str)> {
        self.entries()
            .into_iter()
            .filter(|(_, header)| !headers.iter().any(|h| h == header))
            .collect()
    }
}

/// 每筆輸出都相同的固定欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterviewDefaults {
    pub interviewer_name: String,
    pub persona: String,
    pub respondent_prefix: String,
}

impl Default for InterviewDefaults {
    fn default() -> Self {
        Self {
            interviewer_name: "SimpleGov Survey".into(),
            persona: "Citizen".into(),
            respondent_prefix: "Respondent".into(),
        }
    }
}
