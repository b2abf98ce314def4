use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result map for a batch lookup, keyed by the requested IP address.
///
/// Subjects the upstream had no record for are absent from the map.
pub type BatchReport = HashMap<String, IpReport>;

/// Reputation record for a single IP address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpReport {
    /// Upstream status for this record ("ok", "warning", ...)
    #[serde(default)]
    pub status: Option<String>,

    /// Whether the address is a known proxy ("yes"/"no")
    #[serde(default)]
    pub proxy: Option<String>,

    /// Proxy/anonymizer type ("VPN", "TOR", "SOCKS", "Compromised Server", ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// VPN provider or operator name, when identified
    #[serde(default)]
    pub provider: Option<String>,

    /// Risk score (0-100, higher = worse)
    #[serde(default)]
    pub risk: Option<u8>,

    /// Attack history counters, present when requested with risk data
    #[serde(default)]
    pub attack_history: Option<AttackHistory>,

    /// Autonomous system number (e.g. "AS15169")
    #[serde(default)]
    pub asn: Option<String>,

    /// Announced address range the IP belongs to
    #[serde(default)]
    pub range: Option<String>,

    /// ISP or network operator name
    #[serde(default)]
    pub isp: Option<String>,

    /// Full country name
    #[serde(default)]
    pub country: Option<String>,

    /// Two-letter country code (ISO 3166-1 alpha-2)
    #[serde(default)]
    pub isocode: Option<String>,

    /// City name
    #[serde(default)]
    pub city: Option<String>,

    /// Latitude coordinate
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude coordinate
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Open service port observed on the address
    #[serde(default)]
    pub port: Option<u16>,

    /// When the address was last seen operating as a proxy, human-readable
    #[serde(default)]
    pub last_seen_human: Option<String>,

    /// When the address was last seen operating as a proxy, unix seconds
    #[serde(default)]
    pub last_seen_unix: Option<i64>,

    /// Answering node that served the query
    #[serde(default)]
    pub operator: Option<String>,

    /// Device counts behind the address/subnet
    #[serde(default)]
    pub devices: Option<DeviceCount>,

    /// Server-side query duration
    #[serde(default, rename = "time")]
    pub query_time: Option<String>,
}

impl IpReport {
    /// Returns true if the upstream flagged this address as a proxy
    #[must_use]
    pub fn is_proxy(&self) -> bool {
        self.proxy.as_deref().is_some_and(|p| p.eq_ignore_ascii_case("yes"))
    }

    /// Returns true if the risk score is present and at or above `threshold`
    #[must_use]
    pub fn is_high_risk(&self, threshold: u8) -> bool {
        self.risk.is_some_and(|r| r >= threshold)
    }

    /// Returns the coordinates as a tuple if available
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Attack history counters for an address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackHistory {
    /// Total recorded attacks
    #[serde(default)]
    pub total: Option<u64>,

    /// Vulnerability probing attempts
    #[serde(default)]
    pub vulnerabilities_probed: Option<u64>,

    /// Credential stuffing / login attempts
    #[serde(default)]
    pub login_attempts: Option<u64>,

    /// Comment spam postings
    #[serde(default)]
    pub comment_spam: Option<u64>,

    /// Forum spam postings
    #[serde(default)]
    pub forum_spam: Option<u64>,
}

/// Device counts observed behind an address and its subnet
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeviceCount {
    /// Devices sharing the exact address
    #[serde(default)]
    pub address: Option<u32>,

    /// Devices in the surrounding subnet
    #[serde(default)]
    pub subnet: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_proxy() {
        let mut report = IpReport::default();
        assert!(!report.is_proxy());

        report.proxy = Some("yes".to_string());
        assert!(report.is_proxy());

        report.proxy = Some("YES".to_string());
        assert!(report.is_proxy());

        report.proxy = Some("no".to_string());
        assert!(!report.is_proxy());
    }

    #[test]
    fn test_is_high_risk() {
        let mut report = IpReport::default();
        assert!(!report.is_high_risk(0));

        report.risk = Some(67);
        assert!(report.is_high_risk(50));
        assert!(report.is_high_risk(67));
        assert!(!report.is_high_risk(68));
    }

    #[test]
    fn test_deserialize_partial_record() {
        let report: IpReport = serde_json::from_str(
            r#"{"proxy":"yes","type":"VPN","risk":67,"asn":"AS9009","time":"8ms"}"#,
        )
        .unwrap();
        assert!(report.is_proxy());
        assert_eq!(report.kind.as_deref(), Some("VPN"));
        assert_eq!(report.risk, Some(67));
        assert_eq!(report.asn.as_deref(), Some("AS9009"));
        assert_eq!(report.query_time.as_deref(), Some("8ms"));
        assert!(report.status.is_none());
        assert!(report.devices.is_none());
    }
}
