//! `talentdesk-client` — collaborator boundary for the state layer.
//!
//! Everything the stores need from the outside world lives behind two seams:
//! the [`Transport`] trait (network) and the [`TokenStore`] trait (durable
//! credential). The concrete [`HttpTransport`] and [`FileTokenStore`] are the
//! production implementations; tests substitute their own.

pub mod config;
pub mod http;
pub mod token_store;
pub mod transport;

pub use config::ClientConfig;
pub use http::HttpTransport;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{ApiRequest, CredentialCell, CredentialProvider, Method, Transport};
