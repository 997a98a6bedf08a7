//! URL classification against a list of known-distracting domains.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Built-in distracting domains, used when no override is configured.
pub const DEFAULT_DISTRACTING_DOMAINS: &[&str] = &[
    "netflix.com",
    "youtube.com",
    "reddit.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "tiktok.com",
];

/// Errors that can occur when classifying a URL.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ClassifyError {
    /// The input is not a syntactically valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL parsed but carries no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// The two-way verdict for a visited site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Helpful,
    Distracting,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Helpful => write!(f, "helpful"),
            Self::Distracting => write!(f, "distracting"),
        }
    }
}

/// An immutable set of domains treated as distracting.
///
/// A hostname matches when it contains any entry as a substring, so
/// `m.youtube.com` matches the entry `youtube.com`.
///
/// Entries are normalized to lowercase at construction; empty entries are
/// dropped.
///
/// ## Examples
///
/// ```
/// use studylamp_core::DomainList;
///
/// let domains = DomainList::default();
/// assert!(domains.matches("www.youtube.com"));
/// assert!(!domains.matches("docs.example.org"));
///
/// let custom = DomainList::new(["news.example.com"]);
/// assert!(custom.matches("news.example.com"));
/// assert!(!custom.matches("www.youtube.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainList(Vec<String>);

impl DomainList {
    /// Build a list from arbitrary domain strings.
    #[must_use]
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self(entries)
    }

    /// Returns true when the hostname contains any entry as a substring.
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        let hostname = hostname.to_ascii_lowercase();
        self.0.iter().any(|entry| hostname.contains(entry.as_str()))
    }

    /// The normalized entries, in construction order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Number of entries in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DomainList {
    fn default() -> Self {
        Self::new(DEFAULT_DISTRACTING_DOMAINS.iter().copied())
    }
}

/// Classify a URL as helpful or distracting.
///
/// The input must be an absolute URL with a host; the verdict is driven by
/// the hostname alone, never the path or query.
///
/// # Errors
///
/// Returns an error if the input does not parse as an absolute URL or has no
/// host component.
pub fn classify(raw_url: &str, domains: &DomainList) -> Result<Classification, ClassifyError> {
    let parsed = Url::parse(raw_url)?;
    let host = parsed.host_str().ok_or(ClassifyError::MissingHost)?;
    if host.is_empty() {
        return Err(ClassifyError::MissingHost);
    }

    if domains.matches(host) {
        Ok(Classification::Distracting)
    } else {
        Ok(Classification::Helpful)
    }
}
