//! Per-request lookup options and their resolution into query parameters.
//!
//! The API accepts the same set of toggles in two styles: a comma-joined
//! `flags` parameter, and individual numeric parameters per feature. Each
//! numeric parameter can also be set explicitly to a level beyond plain
//! on/off (e.g. `vpn=2` for extended VPN detection). [`LookupOptions`]
//! reconciles both styles into one canonical parameter list with a
//! deterministic order, which doubles as the cache signature for the request.

use std::time::Duration;

/// Named toggles serialized into the single comma-joined `flags` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QueryFlag {
    /// VPN detection
    Vpn,
    /// Autonomous system data
    Asn,
    /// Answering node name
    Node,
    /// Server-side query timing
    Time,
    /// Real-time inference engine
    Inf,
    /// Risk scoring
    Risk,
    /// Open port detection
    Port,
    /// Last-seen data
    Seen,
    /// Last-seen window in days
    Days,
}

impl QueryFlag {
    /// All flags in canonical wire order.
    const ALL: [Self; 9] = [
        Self::Vpn,
        Self::Asn,
        Self::Node,
        Self::Time,
        Self::Inf,
        Self::Risk,
        Self::Port,
        Self::Seen,
        Self::Days,
    ];

    /// Wire name of the flag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vpn => "vpn",
            Self::Asn => "asn",
            Self::Node => "node",
            Self::Time => "time",
            Self::Inf => "inf",
            Self::Risk => "risk",
            Self::Port => "port",
            Self::Seen => "seen",
            Self::Days => "days",
        }
    }
}

/// Numeric wire value of an explicit feature level.
pub trait FeatureLevel: Copy {
    /// The value emitted for the feature's query parameter
    fn param_value(self) -> u8;
}

/// One feature setting: unset, boolean-style on, or an explicit level.
///
/// This is the reconciliation point for the two configuration styles the API
/// accepts. `Custom` always wins: once an explicit level is chosen the
/// boolean convenience switch cannot override it. `Unset` emits no parameter
/// at all, which the upstream treats differently from an explicit `Off`
/// level (value `0`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Toggle<L> {
    /// Not configured; the parameter is omitted from the request
    #[default]
    Unset,
    /// Boolean convenience switch; emits `1`
    On,
    /// Explicit level; emits the level's numeric value
    Custom(L),
}

impl<L: FeatureLevel> Toggle<L> {
    /// The query parameter value this setting resolves to, if any
    fn param_value(self) -> Option<String> {
        match self {
            Self::Unset => None,
            Self::On => Some("1".to_string()),
            Self::Custom(level) => Some(level.param_value().to_string()),
        }
    }

    const fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

/// VPN detection level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VpnCheck {
    /// Explicitly disabled (`vpn=0`)
    Off,
    /// Basic VPN detection
    Basic,
    /// Extended detection against the full provider dataset
    Extended,
    /// Extended detection plus inference on unlisted ranges
    Inference,
}

impl FeatureLevel for VpnCheck {
    fn param_value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Basic => 1,
            Self::Extended => 2,
            Self::Inference => 3,
        }
    }
}

/// Risk scoring level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskData {
    /// Explicitly disabled (`risk=0`)
    Off,
    /// Risk score only
    Score,
    /// Risk score plus attack history counters
    AttackHistory,
}

impl FeatureLevel for RiskData {
    fn param_value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Score => 1,
            Self::AttackHistory => 2,
        }
    }
}

/// Explicit on/off for the binary features (asn, node, time, inf, port, seen)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    /// Explicitly disabled; emits `0`, unlike an unset feature which emits
    /// nothing
    Off,
    /// Explicitly enabled
    On,
}

impl FeatureLevel for Switch {
    fn param_value(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

/// Last-seen window for the `days` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayWindow {
    /// 7 days
    Week,
    /// 14 days
    Fortnight,
    /// 30 days
    Month,
    /// 60 days
    TwoMonths,
}

impl FeatureLevel for DayWindow {
    fn param_value(self) -> u8 {
        match self {
            Self::Week => 7,
            Self::Fortnight => 14,
            Self::Month => 30,
            Self::TwoMonths => 60,
        }
    }
}

/// Options for a single lookup request.
///
/// Built once per call with the consuming setters and immutable thereafter.
///
/// # Example
///
/// ```rust,ignore
/// use ipintel_client::{LookupOptions, RiskData, VpnCheck};
///
/// let options = LookupOptions::new()
///     .vpn_level(VpnCheck::Extended)
///     .asn(true)
///     .risk_level(RiskData::AttackHistory)
///     .tag("login-form");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOptions {
    flags: Vec<QueryFlag>,
    vpn: Toggle<VpnCheck>,
    asn: Toggle<Switch>,
    node: Toggle<Switch>,
    time: Toggle<Switch>,
    inf: Toggle<Switch>,
    risk: Toggle<RiskData>,
    port: Toggle<Switch>,
    seen: Toggle<Switch>,
    days: Toggle<DayWindow>,
    tag: Option<String>,
    use_ssl: bool,
    cache_ttl: Option<Duration>,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            flags: Vec::new(),
            vpn: Toggle::Unset,
            asn: Toggle::Unset,
            node: Toggle::Unset,
            time: Toggle::Unset,
            inf: Toggle::Unset,
            risk: Toggle::Unset,
            port: Toggle::Unset,
            seen: Toggle::Unset,
            days: Toggle::Unset,
            tag: None,
            use_ssl: true,
            cache_ttl: None,
        }
    }
}

macro_rules! toggle_setters {
    ($(($bool_setter:ident, $level_setter:ident, $field:ident, $level:ty)),+ $(,)?) => {
        $(
            /// Boolean convenience switch for the feature. Ignored once an
            /// explicit level is set.
            #[must_use]
            pub fn $bool_setter(mut self, enabled: bool) -> Self {
                if !self.$field.is_custom() {
                    self.$field = if enabled { Toggle::On } else { Toggle::Unset };
                }
                self
            }

            /// Explicit level for the feature; takes precedence over the
            /// boolean switch.
            #[must_use]
            pub fn $level_setter(mut self, level: $level) -> Self {
                self.$field = Toggle::Custom(level);
                self
            }
        )+
    };
}

impl LookupOptions {
    /// Create an empty option set (SSL on, everything else unset)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named toggle to the `flags` parameter
    #[must_use]
    pub fn flag(mut self, flag: QueryFlag) -> Self {
        self.flags.push(flag);
        self
    }

    /// Add several named toggles at once
    #[must_use]
    pub fn flags<I>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = QueryFlag>,
    {
        self.flags.extend(flags);
        self
    }

    toggle_setters!(
        (vpn, vpn_level, vpn, VpnCheck),
        (asn, asn_level, asn, Switch),
        (node, node_level, node, Switch),
        (time, time_level, time, Switch),
        (inf, inf_level, inf, Switch),
        (risk, risk_level, risk, RiskData),
        (port, port_level, port, Switch),
        (seen, seen_level, seen, Switch),
        (days, days_level, days, DayWindow),
    );

    /// Free-form tag recorded against the query, passed through verbatim
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Whether the upstream should answer over TLS (default true)
    #[must_use]
    pub const fn use_ssl(mut self, ssl: bool) -> Self {
        self.use_ssl = ssl;
        self
    }

    /// Cache this response for `ttl` instead of the client default
    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// The per-request TTL override, if one was set
    #[must_use]
    pub const fn cache_ttl_override(&self) -> Option<Duration> {
        self.cache_ttl
    }

    /// Resolve the options into the canonical query parameter list.
    ///
    /// The order is fixed (flags, features, tag, ssl) and duplicate flags
    /// collapse to one entry, so logically identical option sets always
    /// produce the same parameter list. The request executor relies on this
    /// to derive a stable cache signature from the final URL.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let flags: Vec<&str> = QueryFlag::ALL
            .iter()
            .copied()
            .filter(|f| self.flags.contains(f))
            .map(QueryFlag::as_str)
            .collect();
        if !flags.is_empty() {
            pairs.push(("flags", flags.join(",")));
        }

        let features = [
            ("vpn", self.vpn.param_value()),
            ("asn", self.asn.param_value()),
            ("node", self.node.param_value()),
            ("time", self.time.param_value()),
            ("inf", self.inf.param_value()),
            ("risk", self.risk.param_value()),
            ("port", self.port.param_value()),
            ("seen", self.seen.param_value()),
            ("days", self.days.param_value()),
        ];
        for (name, value) in features {
            if let Some(value) = value {
                pairs.push((name, value));
            }
        }

        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.clone()));
        }

        let ssl = if self.use_ssl { "1" } else { "0" };
        pairs.push(("ssl", ssl.to_string()));

        pairs
    }
}
