pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod render;
pub mod server;
pub mod settings;
pub mod utils;

pub use error::{DashboardError, Result};
pub use readers::DataContext;
