mod automation_repository;
mod board_repository;
mod card_repository;
mod custom_field_repository;
mod label_repository;
mod list_repository;
mod workspace_repository;

pub use automation_repository::*;
pub use board_repository::*;
pub use card_repository::*;
pub use custom_field_repository::*;
pub use label_repository::*;
pub use list_repository::*;
pub use workspace_repository::*;
