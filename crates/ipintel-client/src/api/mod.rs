//! API endpoint modules.

mod dashboard;
mod email;
mod ip;

pub use dashboard::DashboardApi;
pub use email::EmailApi;
pub use ip::IpApi;
