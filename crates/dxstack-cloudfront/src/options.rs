//! Wire-value enums for distribution options.

use serde::{Deserialize, Serialize};

/// Which edge locations serve the distribution; broader coverage costs more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceClass {
    /// North America and Europe only.
    #[default]
    NorthAmericaEurope,
    /// Plus Asia, the Middle East, and Africa.
    PlusAsiaAfrica,
    /// Every edge location.
    AllRegions,
}

impl PriceClass {
    /// The wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NorthAmericaEurope => "PriceClass_100",
            Self::PlusAsiaAfrica => "PriceClass_200",
            Self::AllRegions => "PriceClass_All",
        }
    }
}

/// How viewers may reach the distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerProtocolPolicy {
    /// Reject plain HTTP.
    HttpsOnly,
    /// Redirect plain HTTP to HTTPS.
    #[default]
    RedirectToHttps,
    /// Serve both.
    AllowAll,
}

impl ViewerProtocolPolicy {
    /// The wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HttpsOnly => "https-only",
            Self::RedirectToHttps => "redirect-to-https",
            Self::AllowAll => "allow-all",
        }
    }
}

/// Minimum TLS version viewers must negotiate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityPolicy {
    /// TLS 1.2, 2021 cipher suite.
    #[default]
    TlsV12_2021,
    /// TLS 1.1, 2016 cipher suite.
    TlsV11_2016,
    /// TLS 1.0.
    TlsV1,
}

impl SecurityPolicy {
    /// The wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TlsV12_2021 => "TLSv1.2_2021",
            Self::TlsV11_2016 => "TLSv1.1_2016",
            Self::TlsV1 => "TLSv1",
        }
    }
}

/// How the custom certificate is served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SslMethod {
    /// Server Name Indication.
    #[default]
    Sni,
    /// Dedicated IPs. Legacy, costs extra.
    Vip,
}

impl SslMethod {
    /// The wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sni => "sni-only",
            Self::Vip => "vip",
        }
    }
}

/// HTTP methods the distribution forwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllowedMethods {
    /// GET and HEAD.
    #[default]
    Basic,
    /// All methods, including writes.
    Extended,
}

impl AllowedMethods {
    /// The wire value list.
    #[must_use]
    pub fn methods(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["GET", "HEAD"],
            Self::Extended => &["GET", "HEAD", "OPTIONS", "PUT", "PATCH", "POST", "DELETE"],
        }
    }
}

/// HTTP methods whose responses are cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedMethods {
    /// GET and HEAD.
    #[default]
    Basic,
    /// GET, HEAD, and OPTIONS.
    WithOptions,
}

impl CachedMethods {
    /// The wire value list.
    #[must_use]
    pub fn methods(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["GET", "HEAD"],
            Self::WithOptions => &["GET", "HEAD", "OPTIONS"],
        }
    }
}

/// Lifecycle event an edge function hooks into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeEventType {
    /// Before the cache lookup.
    #[default]
    ViewerRequest,
    /// Before forwarding to the origin.
    OriginRequest,
    /// After the origin responds.
    OriginResponse,
    /// Before returning to the viewer.
    ViewerResponse,
}

impl EdgeEventType {
    /// The wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewerRequest => "viewer-request",
            Self::OriginRequest => "origin-request",
            Self::OriginResponse => "origin-response",
            Self::ViewerResponse => "viewer-response",
        }
    }
}
