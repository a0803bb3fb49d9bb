pub mod analyzer;
pub mod branding;
pub mod scoring;
pub mod showcase;

pub use analyzer::ProfileAnalyzer;
pub use branding::{generate_branding_statement, statement_for_name};
pub use scoring::score_profile;
pub use showcase::select_showcase;
