use serde::{Deserialize, Serialize};
use validator::Validate;

// User role constants
pub const USER_ROLE_STUDENT: &str = "student";
pub const USER_ROLE_ADVISOR: &str = "advisor";
pub const USER_ROLE_PARENT: &str = "parent";
pub const USER_ROLE_ADMIN: &str = "admin";

// User status constants
pub const USER_STATUS_ACTIVE: &str = "active";
pub const USER_STATUS_INACTIVE: &str = "inactive";
pub const USER_STATUS_SUSPENDED: &str = "suspended";
pub const USER_STATUS_VERIFYING: &str = "verifying";

fn default_role() -> String {
    USER_ROLE_STUDENT.to_string()
}

fn default_status() -> String {
    USER_STATUS_VERIFYING.to_string()
}

fn default_language() -> Option<String> {
    Some("en".to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserBase {
    /// Unique identifier for the user
    pub userid: i64,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::DateTime<chrono::Utc>>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,

    // Authentication
    pub hashed_password: String,

    // User management
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_status")]
    pub status: String,

    // Profile information
    #[validate(url)]
    pub profile_picture_url: Option<String>,
    #[validate(length(max = 50))]
    pub timezone: Option<String>,
    #[serde(default = "default_language")]
    pub language_preference: Option<String>,
}
