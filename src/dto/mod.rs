//! DTO modules that bridge services with templates.

pub mod audit;
pub mod main;
pub mod products;
