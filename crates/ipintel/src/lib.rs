//! Rust client for an IP and email reputation API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ipintel::{IntelClient, LookupOptions, VpnCheck};
//!
//! #[tokio::main]
//! async fn main() -> ipintel::Result<()> {
//!     let client = IntelClient::new("your-api-key");
//!
//!     // Single address, extended VPN detection plus risk scoring
//!     let options = LookupOptions::new()
//!         .vpn_level(VpnCheck::Extended)
//!         .risk(true)
//!         .asn(true);
//!     let report = client.ip().lookup("8.8.8.8", &options).await?;
//!     println!("Proxy: {}", report.is_proxy());
//!     println!("Risk: {:?}", report.risk);
//!
//!     // Batch lookup
//!     let batch = client
//!         .ip()
//!         .lookup_many(["1.2.3.4", "5.6.7.8"], &options)
//!         .await?;
//!     println!("Records: {}", batch.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Responses are cached per endpoint with a configurable TTL; repeating an
//! identical request inside the TTL window answers from the cache without
//! touching the network. A blocking client with the same behavior lives in
//! [`blocking`].
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/ipintel/0.3.0")]

// Re-export core types
pub use ipintel_core::*;

// Re-export client
pub use ipintel_client::{
    blocking, DayWindow, FeatureLevel, IntelClient, IntelClientBuilder, LookupOptions, QueryFlag,
    ResponseCache, RiskData, Switch, Toggle, VpnCheck,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
