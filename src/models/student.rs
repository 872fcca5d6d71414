use serde::{Deserialize, Serialize};
use validator::Validate;

/// A school the student attended, with period in mm/yy-mm/yy format.
/// GPA is normalized to a 4.0 scale; -1 when unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub name: String,
    pub period: String,
    pub gpa: f64,
    pub degree: String,
    pub major: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub name: String,
    pub period: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    pub desc: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraCurricular {
    pub name: String,
    pub period: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizedTest {
    pub name: String,
    pub score: f64,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentProfile {
    /// Unique identifier for the user
    pub userid: i64,
    pub gender: String,
    pub overview: String,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub activities: Vec<ExtraCurricular>,
    #[serde(default)]
    pub standardized_tests: Vec<StandardizedTest>,
    #[serde(default)]
    pub awards: Vec<Award>,
    pub others: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentPreference {
    /// Unique identifier for the user
    pub userid: i64,

    // Academic interests
    pub intended_major: Vec<String>,
    pub intended_degree: Vec<String>,

    // Location preferences
    #[serde(default)]
    pub preferred_countries: Vec<String>,
    #[serde(default)]
    pub preferred_cities: Vec<String>,

    // Annual budget in USD for university expenses
    #[validate(range(min = 0))]
    pub budget_min: Option<i64>,
    #[validate(range(min = 0))]
    pub budget_max: Option<i64>,
    pub others: Option<String>,
}
