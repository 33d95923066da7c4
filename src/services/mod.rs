mod automation_service;
mod card_service;

pub use automation_service::*;
pub use card_service::*;

#[cfg(test)]
mod tests;
