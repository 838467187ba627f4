//! Domain model of the catalog dashboard.

pub mod audit;
pub mod category;
pub mod display;
pub mod filters;
pub mod page;
pub mod product;
pub mod types;
