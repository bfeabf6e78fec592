pub mod calculations;
pub mod models;
pub mod proposal;

pub use models::*;
