pub mod store;
pub mod types;

pub use store::{DashStore, STORE};
pub use types::*;
