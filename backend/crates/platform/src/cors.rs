//! CORS Origin Policy
//!
//! Cross-origin requests are allowed for an explicit list of origins plus
//! wildcard host patterns such as `https://*.onrender.com`. The policy is a
//! plain predicate so the binary can hand it to `tower_http::cors::AllowOrigin`.

use std::collections::HashSet;

use axum::http::HeaderValue;

/// Origins the frontend is allowed to call from during development
pub const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Extra host pattern trusted in production deployments
pub const PRODUCTION_PATTERN: &str = "https://*.onrender.com";

/// `scheme://*.suffix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPattern {
    scheme: String,
    suffix: String,
}

impl HostPattern {
    /// Parse `https://*.example.com`; anything without a leading `*.` host is rejected
    pub fn parse(pattern: &str) -> Option<Self> {
        let (scheme, host) = pattern.trim().split_once("://")?;
        let suffix = host.strip_prefix("*.")?.trim_end_matches('/');
        if scheme.is_empty() || suffix.is_empty() {
            return None;
        }
        Some(Self {
            scheme: scheme.to_ascii_lowercase(),
            suffix: format!(".{}", suffix.to_ascii_lowercase()),
        })
    }

    /// True when `origin` has the same scheme and a non-empty label before the suffix
    pub fn matches(&self, origin: &str) -> bool {
        let Some((scheme, host)) = origin.split_once("://") else {
            return false;
        };
        if !scheme.eq_ignore_ascii_case(&self.scheme) {
            return false;
        }
        let host = host.to_ascii_lowercase();
        match host.strip_suffix(&self.suffix) {
            Some(label) => !label.is_empty() && !label.contains('/'),
            None => false,
        }
    }
}

/// Set of allowed origins
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    exact: HashSet<String>,
    patterns: Vec<HostPattern>,
}

impl OriginPolicy {
    /// Build from a list of entries; entries containing `*.` become host patterns
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::default();
        for entry in entries {
            policy.push(entry.as_ref());
        }
        policy
    }

    /// Development origins, the configured frontend origins, and in
    /// production the hosting pattern
    pub fn for_environment<I, S>(configured: I, production: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut policy = Self::new(DEV_ORIGINS.iter());
        for entry in configured {
            policy.push(entry.as_ref());
        }
        if production {
            policy.push(PRODUCTION_PATTERN);
        }
        policy
    }

    pub fn push(&mut self, entry: &str) {
        let entry = entry.trim().trim_end_matches('/');
        if entry.is_empty() {
            return;
        }
        if entry.contains("*.") {
            match HostPattern::parse(entry) {
                Some(pattern) => self.patterns.push(pattern),
                None => tracing::warn!(entry, "Ignoring malformed CORS origin pattern"),
            }
        } else {
            self.exact.insert(entry.to_ascii_lowercase());
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.exact.contains(&origin.to_ascii_lowercase())
            || self.patterns.iter().any(|p| p.matches(origin))
    }

    /// Predicate form for `Origin` header values
    pub fn allows_header(&self, origin: &HeaderValue) -> bool {
        origin.to_str().map(|o| self.allows(o)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_origins() {
        let policy = OriginPolicy::new(["https://app.example.com/"]);
        assert!(policy.allows("https://app.example.com"));
        assert!(!policy.allows("http://app.example.com"));
        assert!(!policy.allows("https://evil.example.com"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let policy = OriginPolicy::new([PRODUCTION_PATTERN]);
        assert!(policy.allows("https://my-frontend.onrender.com"));
        assert!(!policy.allows("https://onrender.com"));
        assert!(!policy.allows("http://my-frontend.onrender.com"));
        assert!(!policy.allows("https://my-frontend.onrender.com.evil.io"));
    }

    #[test]
    fn test_malformed_pattern_is_ignored() {
        let policy = OriginPolicy::new(["*.example.com", "https://*."]);
        assert!(!policy.allows("https://a.example.com"));
    }

    #[test]
    fn test_environment_policy() {
        let dev = OriginPolicy::for_environment(["https://site.test"], false);
        assert!(dev.allows("http://localhost:5173"));
        assert!(dev.allows("https://site.test"));
        assert!(!dev.allows("https://x.onrender.com"));

        let prod = OriginPolicy::for_environment(Vec::<String>::new(), true);
        assert!(prod.allows("https://x.onrender.com"));
    }

    #[test]
    fn test_header_predicate() {
        let policy = OriginPolicy::new(["http://localhost:3000"]);
        assert!(policy.allows_header(&HeaderValue::from_static("http://localhost:3000")));
        assert!(!policy.allows_header(&HeaderValue::from_static("null")));
    }
}
