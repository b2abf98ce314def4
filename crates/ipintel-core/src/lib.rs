//! Core types for the ipintel reputation API client.
//!
//! This crate provides the foundational types used across the ipintel library:
//!
//! - **Types**: Strongly-typed representations of reputation API responses
//! - **Errors**: Comprehensive error handling with [`IntelError`]
//! - **Status classification**: The shared decision table that maps upstream
//!   status/message pairs onto the error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use ipintel_core::{IpReport, IntelError, Result};
//!
//! fn process_report(report: IpReport) -> Result<()> {
//!     println!("Proxy: {}", report.is_proxy());
//!     println!("Risk: {:?}", report.risk);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/ipintel-core/0.3.0")]

mod error;
mod status;
pub mod types;

pub use error::{IntelError, QuotaStatus, Result};
pub use status::classify;
pub use types::*;
