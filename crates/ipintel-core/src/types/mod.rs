//! Response types for the reputation API.

mod email;
mod ip;
mod usage;

pub use email::EmailReport;
pub use ip::{AttackHistory, BatchReport, DeviceCount, IpReport};
pub use usage::UsageReport;
