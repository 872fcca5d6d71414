use serde::{Deserialize, Serialize};
use validator::Validate;

// ========================
// Core University Entities
// ========================
//
// NOTE: ACCREDITATION POLICY
// --------------------------
// This application only works with accredited programs and institutions,
// so no accreditation fields appear on these models.

/// Location information for physical entities
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Location {
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub country: String,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    /// e.g., "40.7128,-74.0060"
    #[validate(length(max = 50))]
    pub coordinates: Option<String>,
}

/// Contact information for entities
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(url, length(max = 500))]
    pub website: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

// University types as string constants
pub const UNIVERSITY_TYPE_PUBLIC: &str = "public";
pub const UNIVERSITY_TYPE_PRIVATE: &str = "private";
pub const UNIVERSITY_TYPE_COMMUNITY: &str = "community";
pub const UNIVERSITY_TYPE_FOR_PROFIT: &str = "for_profit";
pub const UNIVERSITY_TYPE_NON_PROFIT: &str = "non_profit";

// =====================
// University Metrics
// =====================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EduStats {
    // Enrollment statistics
    #[validate(range(min = 0))]
    pub total_enrollment: Option<i64>,
    #[validate(range(min = 0))]
    pub undergraduate_enrollment: Option<i64>,
    #[validate(range(min = 0))]
    pub graduate_enrollment: Option<i64>,
    #[validate(range(min = 0))]
    pub international_enrollment: Option<i64>,

    // Staff and faculty statistics
    #[validate(range(min = 0.0))]
    pub student_per_staff_ratio: Option<f64>,
    #[validate(range(min = 0))]
    pub total_staff: Option<i64>,
    #[validate(range(min = 0))]
    pub faculty_count: Option<i64>,

    // Demographics
    #[validate(range(min = 0.0, max = 1.0))]
    pub international_ratio: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub female_ratio: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub male_ratio: Option<f64>,

    // Additional statistics
    #[validate(range(min = 0.0, max = 1.0))]
    pub acceptance_rate: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub graduation_rate: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub retention_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EduScore {
    // Overall scores
    #[validate(range(min = 0.0, max = 100.0))]
    pub overall_score: Option<f64>,
    #[validate(range(min = 1))]
    pub world_ranking: Option<i64>,
    #[validate(range(min = 1))]
    pub national_ranking: Option<i64>,

    // Subject-specific scores
    #[validate(range(min = 0.0, max = 100.0))]
    pub teaching_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub research_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub citation_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub industry_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub international_outlook_score: Option<f64>,

    // Additional metrics
    #[validate(range(min = 0.0, max = 100.0))]
    pub reputation_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub employer_reputation_score: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub academic_reputation_score: Option<f64>,

    #[validate(range(min = 2000, max = 2030))]
    pub ranking_year: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct University {
    pub university_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(length(max = 50))]
    pub alias: String,

    #[validate(nested)]
    pub location: Location,
    #[validate(nested)]
    pub contact: Option<Contact>,

    #[validate(length(max = 8000))]
    pub overview: Option<String>,
    #[validate(length(max = 8000))]
    pub history: Option<String>,
    #[validate(length(max = 8000))]
    pub other: Option<String>,

    #[validate(nested)]
    pub stats: Option<EduStats>,
    #[validate(nested)]
    pub score: Option<EduScore>,
}

// =====================
// Academic Structure
// =====================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Faculty {
    pub faculty_id: i64,
    pub university_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 8000))]
    pub desc: Option<String>,
    #[validate(length(max = 50))]
    pub alias: Option<String>,
    #[validate(length(max = 8000))]
    pub other: Option<String>,
    #[validate(nested)]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Department {
    pub department_id: i64,
    pub university_id: i64,
    pub faculty_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 8000))]
    pub desc: Option<String>,
    #[validate(length(max = 50))]
    pub alias: Option<String>,
    #[validate(length(max = 8000))]
    pub other: Option<String>,
    #[validate(nested)]
    pub contact: Option<Contact>,
}

// =====================
// Campus & Facilities
// =====================

// Facility types as string constants
pub const FACILITY_TYPE_LIBRARY: &str = "library";
pub const FACILITY_TYPE_LABORATORY: &str = "laboratory";
pub const FACILITY_TYPE_DORMITORY: &str = "dormitory";
pub const FACILITY_TYPE_SPORTS_COMPLEX: &str = "sports_complex";
pub const FACILITY_TYPE_AUDITORIUM: &str = "auditorium";
pub const FACILITY_TYPE_CLASSROOM: &str = "classroom";
pub const FACILITY_TYPE_CAFETERIA: &str = "cafeteria";
pub const FACILITY_TYPE_ADMINISTRATIVE: &str = "administrative";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Facility {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 8000))]
    pub desc: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(range(min = 0))]
    pub capacity: Option<i64>,
    #[validate(nested)]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Campus {
    pub campus_id: i64,
    pub university_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 8000))]
    pub desc: String,
    #[serde(default)]
    #[validate(nested)]
    pub facilities: Vec<Facility>,
    #[validate(nested)]
    pub location: Location,
    #[validate(nested)]
    pub contact: Option<Contact>,
}

// =====================
// Programs
// =====================

// Program levels as string constants
pub const PROGRAM_LEVEL_BACHELOR: &str = "bachelor";
pub const PROGRAM_LEVEL_MASTER: &str = "master";
pub const PROGRAM_LEVEL_PHD: &str = "phd";
pub const PROGRAM_LEVEL_ASSOCIATE: &str = "associate";
pub const PROGRAM_LEVEL_CERTIFICATE: &str = "certificate";
pub const PROGRAM_LEVEL_DIPLOMA: &str = "diploma";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Program {
    pub program_id: i64,
    pub department_id: i64,
    pub university_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 8000))]
    pub desc: String,
    pub level: String,
    #[validate(range(min = 1, max = 10))]
    pub years: Option<i64>,
    #[validate(nested)]
    pub contact: Option<Contact>,

    // Program metrics
    #[validate(nested)]
    pub stats: Option<EduStats>,
    #[validate(nested)]
    pub score: Option<EduScore>,

    // Reference links
    #[validate(url, length(max = 500))]
    pub ref_tuition: Option<String>,
    #[validate(url, length(max = 500))]
    pub ref_syllabus: Option<String>,
    #[validate(url, length(max = 500))]
    pub ref_admission: Option<String>,
    #[validate(url, length(max = 500))]
    pub ref_outcome: Option<String>,
}

// =====================
// People
// =====================

// Gender options as string constants
pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";
pub const GENDER_OTHER: &str = "other";
pub const GENDER_PREFER_NOT_TO_SAY: &str = "prefer_not_to_say";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Person {
    pub person_id: i64,
    pub university_id: i64,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    #[validate(nested)]
    pub contact: Option<Contact>,
    #[validate(length(max = 8000))]
    pub about: Option<String>,
    #[validate(length(max = 8000))]
    pub other: Option<String>,
}

// =====================
// Research
// =====================

/// Core research lab entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResearchLab {
    pub lab_id: i64,
    pub department_id: i64,
    pub university_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 8000))]
    pub desc: String,
    #[validate(nested)]
    pub contact: Option<Contact>,
}
