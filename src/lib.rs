pub mod ams;
pub mod bop;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::init_tracing;

/// Which implementation sits behind a client trait object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientVariant {
    /// Talks to the remote service
    Live,
    /// Canned, in-memory responses
    Mock,
}

impl ClientVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientVariant::Live => "live",
            ClientVariant::Mock => "mock",
        }
    }
}
