mod auth;
mod rate_limit;

pub use auth::*;
pub use rate_limit::*;
