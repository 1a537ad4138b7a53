//! Test fixtures.
//!
//! - `factory` - JSON records shaped exactly like the herdbook API's responses

pub mod factory;
