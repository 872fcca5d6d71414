use serde::{Deserialize, Serialize};
use validator::Validate;

use super::university::Contact;

// =====================
// Scholarship System Models
// =====================

// Provider types as string constants
pub const PROVIDER_TYPE_GOVERNMENT: &str = "government";
pub const PROVIDER_TYPE_UNIVERSITY: &str = "university";
pub const PROVIDER_TYPE_NGO: &str = "ngo";
pub const PROVIDER_TYPE_PRIVATE_COMPANY: &str = "private_company";
pub const PROVIDER_TYPE_FOUNDATION: &str = "foundation";
pub const PROVIDER_TYPE_INTERNATIONAL_ORGANIZATION: &str = "international_organization";
pub const PROVIDER_TYPE_INDIVIDUAL_DONOR: &str = "individual_donor";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScholarshipProvider {
    pub provider_id: Option<i64>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    #[validate(nested)]
    pub contact: Option<Contact>,
}

// Criteria types as string constants
pub const CRITERIA_TYPE_GPA: &str = "gpa";
pub const CRITERIA_TYPE_NATIONALITY: &str = "nationality";
pub const CRITERIA_TYPE_INCOME_LEVEL: &str = "income_level";
pub const CRITERIA_TYPE_PROGRAM: &str = "program";
pub const CRITERIA_TYPE_DEGREE_LEVEL: &str = "degree_level";
pub const CRITERIA_TYPE_AGE: &str = "age";
pub const CRITERIA_TYPE_GENDER: &str = "gender";
pub const CRITERIA_TYPE_FIELD_OF_STUDY: &str = "field_of_study";
pub const CRITERIA_TYPE_ACADEMIC_ACHIEVEMENT: &str = "academic_achievement";
pub const CRITERIA_TYPE_FINANCIAL_NEED: &str = "financial_need";
pub const CRITERIA_TYPE_COMMUNITY_SERVICE: &str = "community_service";
pub const CRITERIA_TYPE_LEADERSHIP: &str = "leadership";
pub const CRITERIA_TYPE_SPORTS: &str = "sports";
pub const CRITERIA_TYPE_ARTS: &str = "arts";
pub const CRITERIA_TYPE_RESEARCH_INTEREST: &str = "research_interest";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScholarshipEligibility {
    pub criteria_type: String,
    #[validate(length(max = 255))]
    pub criteria_value: String,
    pub description: Option<String>,
}

// Scholarship categories as string constants
pub const SCHOLARSHIP_TYPE_MERIT_BASED: &str = "merit_based";
pub const SCHOLARSHIP_TYPE_NEED_BASED: &str = "need_based";
pub const SCHOLARSHIP_TYPE_ATHLETIC: &str = "athletic";
pub const SCHOLARSHIP_TYPE_ACADEMIC: &str = "academic";
pub const SCHOLARSHIP_TYPE_RESEARCH: &str = "research";
pub const SCHOLARSHIP_TYPE_DIVERSITY: &str = "diversity";
pub const SCHOLARSHIP_TYPE_INTERNATIONAL: &str = "international";
pub const SCHOLARSHIP_TYPE_MINORITY: &str = "minority";
pub const SCHOLARSHIP_TYPE_FIRST_GENERATION: &str = "first_generation";
pub const SCHOLARSHIP_TYPE_FIELD_SPECIFIC: &str = "field_specific";

fn default_currency() -> String {
    "USD".to_string()
}

/// Comprehensive scholarship model with flexible amount ranges
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Scholarship {
    pub scholarship_id: Option<i64>,
    pub provider_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 8000))]
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,

    #[validate(range(min = 0.0))]
    pub amount_min: Option<f64>,
    #[validate(range(min = 0.0))]
    pub amount_max: Option<f64>,
    #[serde(default = "default_currency")]
    #[validate(length(min = 3, max = 10))]
    pub currency: String,

    #[serde(default)]
    #[validate(nested)]
    pub eligibility: Vec<ScholarshipEligibility>,

    pub application_deadline: Option<chrono::NaiveDate>,
    pub application_start_date: Option<chrono::NaiveDate>,
    pub notification_date: Option<chrono::NaiveDate>,
    #[validate(nested)]
    pub contact: Option<Contact>,
}
