// Entity models mirrored from the product's document schemas

pub mod plan;
pub mod scholarship;
pub mod student;
pub mod university;
pub mod user;

pub use plan::*;
pub use scholarship::*;
pub use student::*;
pub use university::*;
pub use user::*;

use std::sync::Arc;

use crate::config::Config;
use crate::db::DocumentStore;
use crate::embeddings::SearchSync;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub store: DocumentStore,
    pub search: Arc<SearchSync>,
}
