use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationPhase {
    Research,
    Preparation,
    Application,
    Submission,
    Review,
    Decision,
    Acceptance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
    Cancelled,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// A single task on a student's application plan.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationTask {
    pub plan_id: i64,
    pub userid: i64,

    #[validate(length(min = 1, max = 300))]
    pub task_name: String,
    pub task_description: Option<String>,
    pub task_phase: ApplicationPhase,

    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,

    // Timing
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    #[validate(range(min = 0))]
    pub estimated_duration_hours: Option<i64>,
    #[validate(range(min = 0))]
    pub actual_time_spent_hours: Option<i64>,

    // Task dependencies
    pub depends_on_tasks: Option<Vec<i64>>,
    pub prerequisite_tasks: Option<Vec<i64>>,

    #[validate(length(max = 100))]
    pub task_type: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,

    // Resources and links
    pub resources: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub tips: Option<String>,
}
