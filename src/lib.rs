pub mod config;
pub mod error;
pub mod import;
pub mod portal;
pub mod scheduler;
pub mod store;
pub mod worker;

pub use error::{PortalError, Result};
pub use portal::StudentPortal;
