//! Shared configuration and domain types for the keyword report service.

pub mod app_config;
pub mod company;
pub mod config;
pub mod keywords;
pub mod templates;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use company::{load_company_info, CompanyInfo, CompanyInfoRow};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::KeywordRecord;
pub use templates::{IndustryTemplate, TemplateOverrides, TemplateStore};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read company info file {path}: {source}")]
    CompanyInfoIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse company info file: {0}")]
    CompanyInfoParse(#[from] serde_yaml::Error),
}
