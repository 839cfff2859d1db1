//! Ferrous Lookup Infrastructure Layer
pub mod cache;
pub mod dns;
pub mod logging;
