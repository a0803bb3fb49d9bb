pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;

pub use config::Config;
pub use error::{Error, Result};
pub use github::{GitHubClient, GitHubDataProvider};
pub use analysis::{generate_branding_statement, ProfileAnalyzer};
