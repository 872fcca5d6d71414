use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub qdrant: QdrantConfig,
    pub embedding: EmbeddingConfig,
    pub collections: CollectionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub debug: bool,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    /// Dimensionality of the vectors produced by `model`.
    pub size: u64,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsConfig {
    pub documents: DocumentCollections,
    pub search: SearchCollections,
}

/// Document-store collection names, one per entity type.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentCollections {
    pub user_base: String,
    pub student_profiles: String,
    pub student_preferences: String,
    pub universities: String,
    pub university_faculties: String,
    pub university_departments: String,
    pub university_campuses: String,
    pub university_programs: String,
    pub university_people: String,
    pub university_research: String,
    pub scholarships: String,
    pub scholarship_providers: String,
    pub plans: String,
}

/// Vector-index collection names for the searchable entity types.
/// The join table backing each index shares its name.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCollections {
    pub universities: String,
    pub university_faculties: String,
    pub university_departments: String,
    pub university_campuses: String,
    pub university_programs: String,
    pub university_people: String,
    pub university_research: String,
    pub scholarships: String,
    pub scholarship_providers: String,
}

impl Config {
    /// Load configuration from `config/config.{UNIFLY_ENV}.yaml`, with
    /// `UNIFLY__SECTION__FIELD` environment variables layered on top.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = env::var("UNIFLY_ENV").unwrap_or_else(|_| "dev".to_string());
        let path = format!("config/config.{environment}.yaml");

        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(&path))
            .add_source(config::Environment::with_prefix("UNIFLY").separator("__"))
            .build()
            .with_context(|| format!("failed to read configuration from {path}"))?
            .try_deserialize()
            .context("invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.embedding.chunk_size == 0 {
            bail!("embedding.chunk_size must be greater than zero");
        }
        if self.embedding.chunk_overlap >= self.embedding.chunk_size {
            bail!(
                "embedding.chunk_overlap ({}) must be smaller than embedding.chunk_size ({})",
                self.embedding.chunk_overlap,
                self.embedding.chunk_size
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    const SAMPLE: &str = r#"
app: { name: "Unifly Backend", version: "0.1.0", environment: "test", debug: true, log_level: "debug" }
server: { host: "127.0.0.1", port: 8000, cors_allowed_origins: ["http://localhost:3000"] }
database: { url: "postgres://localhost/unifly", max_connections: 5, min_connections: 1 }
qdrant: { url: "http://localhost:6334", api_key: null }
embedding: { provider: "google", model: "gemini-embedding-001", size: 768, chunk_size: 100, chunk_overlap: 20, api_key: "" }
collections:
  documents:
    user_base: user_base
    student_profiles: student_profiles
    student_preferences: student_preferences
    universities: universities
    university_faculties: university_faculties
    university_departments: university_departments
    university_campuses: university_campuses
    university_programs: university_programs
    university_people: university_people
    university_research: university_research
    scholarships: scholarships
    scholarship_providers: scholarship_providers
    plans: plans
  search:
    universities: vec_universities
    university_faculties: vec_university_faculties
    university_departments: vec_university_departments
    university_campuses: vec_university_campuses
    university_programs: vec_university_programs
    university_people: vec_university_people
    university_research: vec_university_research
    scholarships: vec_scholarships
    scholarship_providers: vec_scholarship_providers
"#;

    #[test]
    fn parses_yaml_config() {
        let config = parse(SAMPLE);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.embedding.chunk_size, 100);
        assert_eq!(config.collections.search.scholarships, "vec_scholarships");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_overlap_at_least_chunk_size() {
        let mut config = parse(SAMPLE);
        config.embedding.chunk_overlap = config.embedding.chunk_size;
        assert!(config.validate().is_err());
    }
}
