// mistly-api: Async Rust client for the Mist cloud management API

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod orgs;
pub mod sites;
pub mod transport;

pub use client::MistClient;
pub use error::Error;
pub use transport::{RetryPolicy, TlsMode, TransportConfig};
