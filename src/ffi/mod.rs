//! Raw C boundary of the facerec engine.
//!
//! This module holds everything that mirrors the engine ABI: the capability
//! table traits, C type aliases, `StructStorage` field ids and the adapters
//! the engine calls back into during a call. Nothing here owns engine
//! objects; see [`crate::handle`] for that.

#[allow(clippy::missing_safety_doc)]
pub mod api;
pub(crate) mod adapters;
pub mod fields;
pub mod types;

pub use api::*;
pub use types::*;

/// Prefix of every exported engine symbol.
pub const SYMBOL_PREFIX: &str = "__4848a76477c449608aa5deb15c5495e4_facerec_v3_";

/// Full exported name of an engine symbol.
pub fn engine_symbol_name(name: &str) -> String {
    format!("{SYMBOL_PREFIX}{name}")
}
