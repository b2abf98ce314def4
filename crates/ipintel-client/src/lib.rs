//! HTTP client for the ipintel reputation API.
//!
//! This crate provides the async [`IntelClient`] and its
//! [`blocking`] counterpart. Both share the same option resolution,
//! response caching, and status classification; the async client suspends
//! at the transport call, the blocking client blocks through it.

#![doc(html_root_url = "https://docs.rs/ipintel-client/0.3.0")]

pub mod api;
pub mod blocking;
mod cache;
mod client;
mod options;

pub use cache::ResponseCache;
pub use client::{IntelClient, IntelClientBuilder};
pub use ipintel_core::{IntelError, Result};
pub use options::{
    DayWindow, FeatureLevel, LookupOptions, QueryFlag, RiskData, Switch, Toggle, VpnCheck,
};
