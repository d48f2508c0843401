// forticsv-api: Async client for the FortiGate administrative REST API.

pub mod error;
pub mod session;
pub mod transport;

pub use error::Error;
pub use session::FortiSession;
pub use transport::{TlsMode, TransportConfig};
