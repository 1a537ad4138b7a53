//! Typed client SDK for the herdbook farm-management API.
//!
//! The crate is layered bottom-up:
//! - [`client`] performs HTTP I/O and normalizes response envelopes
//! - [`service`] maps each resource onto its endpoints
//! - [`preference`] converges a farm's preference set to a desired list
//! - [`hook`] keeps observable, self-refreshing state for lists, single records and polls

pub mod client;
pub mod config;
pub mod error;
pub mod hook;
pub mod model;
pub mod preference;
pub mod service;

pub use client::{ApiClient, RequestOptions};
pub use config::Config;
pub use error::{Error, ErrorKind};
