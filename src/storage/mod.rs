//! In-memory storage for monitored targets and their fetch histories.

mod history;
mod models;
mod store;

pub use history::*;
pub use models::*;
pub use store::*;
