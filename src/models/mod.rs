pub mod user;
pub mod contribution;
pub mod language;
pub mod strength;
pub mod activity;

pub use user::*;
pub use contribution::*;
pub use language::*;
pub use strength::*;
pub use activity::*;
