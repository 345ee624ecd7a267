pub mod api;
pub mod cli;
pub mod models;
pub mod ui;
pub mod utils;

pub use models::*;
pub use utils::*;
