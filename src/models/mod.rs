mod automation;
mod board;
mod card;
mod common;
mod custom_field;
mod label;
mod list;
mod workspace;

pub use automation::*;
pub use board::*;
pub use card::*;
pub use common::*;
pub use custom_field::*;
pub use label::*;
pub use list::*;
pub use workspace::*;
