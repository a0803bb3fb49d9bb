pub mod client;
pub mod provider;
pub mod rate_limiter;
pub mod paginator;

pub use client::GitHubClient;
pub use provider::GitHubDataProvider;
pub use rate_limiter::RateLimiter;
