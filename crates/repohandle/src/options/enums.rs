//! Fixed-set values for enum options.
//!
//! The catalog stores enum options by name (`"v6"`, `"socks5"`), and these
//! types give collaborators a typed view of the same names. `NAMES` is the
//! fixed set the coercion rules validate against, so each enum's variants
//! and its `NAMES` slice must stay in the same order.

use serde::{Deserialize, Serialize};

/// Name resolution policy for connections (`ipresolve`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpResolve {
    /// Use whatever address family the resolver returns.
    #[default]
    Whatever,
    V4,
    V6,
}

impl IpResolve {
    pub const NAMES: &'static [&'static str] = &["whatever", "v4", "v6"];

    pub fn as_str(self) -> &'static str {
        match self {
            IpResolve::Whatever => "whatever",
            IpResolve::V4 => "v4",
            IpResolve::V6 => "v6",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "whatever" => Some(IpResolve::Whatever),
            "v4" => Some(IpResolve::V4),
            "v6" => Some(IpResolve::V6),
            _ => None,
        }
    }
}

/// Repository flavour the handle downloads (`repotype`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    #[default]
    Yum,
    Suse,
    Deb,
}

impl RepoType {
    pub const NAMES: &'static [&'static str] = &["yum", "suse", "deb"];

    pub fn as_str(self) -> &'static str {
        match self {
            RepoType::Yum => "yum",
            RepoType::Suse => "suse",
            RepoType::Deb => "deb",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "yum" => Some(RepoType::Yum),
            "suse" => Some(RepoType::Suse),
            "deb" => Some(RepoType::Deb),
            _ => None,
        }
    }
}

/// Proxy protocol (`proxytype`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProxyType {
    #[default]
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "http1.0")]
    Http10,
    #[serde(rename = "socks4")]
    Socks4,
    #[serde(rename = "socks5")]
    Socks5,
    #[serde(rename = "socks4a")]
    Socks4a,
    /// SOCKS5 with the proxy resolving host names.
    #[serde(rename = "socks5hostname")]
    Socks5Hostname,
}

impl ProxyType {
    pub const NAMES: &'static [&'static str] = &[
        "http",
        "http1.0",
        "socks4",
        "socks5",
        "socks4a",
        "socks5hostname",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProxyType::Http => "http",
            ProxyType::Http10 => "http1.0",
            ProxyType::Socks4 => "socks4",
            ProxyType::Socks5 => "socks5",
            ProxyType::Socks4a => "socks4a",
            ProxyType::Socks5Hostname => "socks5hostname",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "http" => Some(ProxyType::Http),
            "http1.0" => Some(ProxyType::Http10),
            "socks4" => Some(ProxyType::Socks4),
            "socks5" => Some(ProxyType::Socks5),
            "socks4a" => Some(ProxyType::Socks4a),
            "socks5hostname" => Some(ProxyType::Socks5Hostname),
            _ => None,
        }
    }
}

/// Find the canonical spelling of `name` within a fixed set.
pub(crate) fn canonical_name(set: &'static [&'static str], name: &str) -> Option<&'static str> {
    set.iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
}
