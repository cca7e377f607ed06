//! Domain layer - core business logic and entities

pub mod address;
pub mod alert;
pub mod quote;
