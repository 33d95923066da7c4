mod jwt;
mod paginate;
pub mod response;
mod validator;

pub use jwt::*;
pub use paginate::*;
pub use response::*;
pub use validator::*;
