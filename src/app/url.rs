//! Input validation and normalization.

use log::warn;

use crate::config::MAX_INPUT_LENGTH;
use crate::pipeline::Target;

/// Validates an input line and turns it into a lookup [`Target`].
///
/// Bare domains get an `https://` prefix. Only http/https URLs with a host are
/// accepted. Logs a warning and returns `None` for anything else, including
/// lines longer than `MAX_INPUT_LENGTH`.
pub fn validate_and_normalize_url(input: &str) -> Option<Target> {
    if input.len() > MAX_INPUT_LENGTH {
        warn!(
            "Skipping input exceeding maximum length ({} > {}): {}...",
            input.len(),
            MAX_INPUT_LENGTH,
            input.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else if input.contains("://") {
        warn!("Skipping unsupported scheme for input: {input}");
        return None;
    } else {
        format!("https://{input}")
    };

    match Target::parse(&normalized) {
        Ok(target) => Some(target),
        Err(e) => {
            warn!("Skipping invalid input {input}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    fn hostname(input: &str) -> Option<String> {
        validate_and_normalize_url(input).map(|t| t.hostname().to_string())
    }

    #[test]
    fn test_bare_domain_gets_https() {
        let target = validate_and_normalize_url("example.com").expect("valid domain");
        assert_eq!(target.to_string(), "https://example.com/");
        assert_eq!(target.hostname(), "example.com");
    }

    #[test]
    fn test_preserves_http_and_https() {
        let target = validate_and_normalize_url("http://example.com").expect("valid URL");
        assert_eq!(target.url().scheme(), "http");
        let target = validate_and_normalize_url("https://example.com/a?b=c").expect("valid URL");
        assert_eq!(target.to_string(), "https://example.com/a?b=c");
    }

    #[test]
    fn test_hostname_ignores_path_and_port() {
        assert_eq!(hostname("example.com:8080/path"), Some("example.com".into()));
        assert_eq!(hostname("sub.example.org/x#frag"), Some("sub.example.org".into()));
    }

    #[test]
    fn test_ipv6_literal() {
        assert_eq!(hostname("[2001:db8::1]"), Some("[2001:db8::1]".into()));
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        assert!(validate_and_normalize_url("ftp://example.com").is_none());
        assert!(validate_and_normalize_url("file:///etc/hosts").is_none());
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(validate_and_normalize_url("not a valid url!!!").is_none());
        assert!(validate_and_normalize_url("https://").is_none());
    }

    #[test]
    fn test_rejects_too_long_input() {
        let long = format!("{}.com", "a".repeat(crate::config::MAX_INPUT_LENGTH));
        assert!(validate_and_normalize_url(&long).is_none());
    }
}
