//! Lookup target.

use std::fmt;

use url::Url;

/// A URL whose host names the domain to locate.
///
/// Always carries a non-empty host. `Display` renders the full URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parses an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns the parse error, or `url::ParseError::EmptyHost` when the URL
    /// has no host (e.g. `mailto:` or `file:///`).
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Self::from_url(Url::parse(input)?).ok_or(url::ParseError::EmptyHost)
    }

    /// Wraps `url` if it carries a non-empty host.
    pub fn from_url(url: Url) -> Option<Self> {
        match url.host_str() {
            Some(host) if !host.is_empty() => Some(Self { url }),
            _ => None,
        }
    }

    /// The host to resolve. IPv6 literals keep their brackets.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
