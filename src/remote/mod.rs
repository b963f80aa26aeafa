//! Remote Store Module
//!
//! The async seam between the coordinator and the persistence service:
//! the [`RemoteStore`] contract and its HTTP/JSON implementation.

pub mod client;
pub mod http;

pub use client::RemoteStore;
pub use http::HttpRemoteStore;
