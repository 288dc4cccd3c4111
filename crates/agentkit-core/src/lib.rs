pub mod config;
pub mod error;
pub mod io;
pub mod migrate;
pub mod paths;
pub mod reconcile;
pub mod scan;
pub mod state;
pub mod transition;
pub mod types;

pub use error::{AgentkitError, Result};
