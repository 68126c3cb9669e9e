use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{8,128}$").expect("key pattern parse error"));

/// Options of a single sitemap submission.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    /// IndexNow key, the submission is skipped without one.
    pub key: Option<String>,
    /// Host sent to the engine, derived from the first URL when absent.
    pub site: Option<String>,
    /// Engine host, `api.indexnow.org` when absent.
    pub engine: Option<String>,
}

impl Options {
    #[inline]
    pub fn key(&self) -> Option<&str> {
        non_empty(&self.key)
    }

    #[inline]
    pub fn site(&self) -> Option<&str> {
        non_empty(&self.site)
    }

    #[inline]
    pub fn engine(&self) -> Option<&str> {
        non_empty(&self.engine)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A key known to match `^[A-Za-z0-9-]{8,128}$`.
///
/// IndexNow keys are public, the site serves them at `https://{host}/{key}.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        if KEY_PATTERN.is_match(key) {
            Ok(Self(key.to_owned()))
        } else {
            Err(ValidationError::InvalidKey)
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The explicit `site` when given, otherwise the host name of the first URL.
pub fn resolve_host(site: Option<&str>, urls: &[String]) -> Result<String, ValidationError> {
    if let Some(site) = site {
        return Ok(site.to_owned());
    }

    let Some(first) = urls.first() else {
        return Err(ValidationError::MissingHost);
    };
    let url = url::Url::parse(first).map_err(|source| ValidationError::UnparseableUrl {
        url: first.clone(),
        source,
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_owned()),
        _ => Err(ValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pattern() {
        let valid = [
            "abcd1234".to_owned(),
            "test-api-key-12345".to_owned(),
            "ABCDEF-0123456789".to_owned(),
            "--------".to_owned(),
            "a".repeat(128),
        ];
        for key in valid {
            assert!(ApiKey::parse(&key).is_ok(), "Expect valid key {key}");
        }

        let invalid = [
            "".to_owned(),
            "abc1234".to_owned(),
            "a".repeat(129),
            "abcd 1234".to_owned(),
            "abcd_1234".to_owned(),
            "abcd1234\n".to_owned(),
            "clé-1234567".to_owned(),
        ];
        for key in invalid {
            assert!(
                matches!(ApiKey::parse(&key), Err(ValidationError::InvalidKey)),
                "Expect invalid key {key:?}"
            );
        }
    }

    #[test]
    fn test_key_debug_match_key_file() {
        let key = ApiKey::parse("public-key-1234").unwrap();
        assert_eq!(format!("{key:?}"), r#"ApiKey("public-key-1234")"#);
        assert_eq!(key.as_str(), "public-key-1234");
    }

    #[test]
    fn test_options_treat_empty_as_absent() {
        let options = Options {
            key: Some(String::new()),
            site: Some("example.com".to_owned()),
            engine: None,
        };

        assert_eq!(options.key(), None);
        assert_eq!(options.site(), Some("example.com"));
        assert_eq!(options.engine(), None);
    }

    #[test]
    fn test_resolve_host() {
        let urls = vec!["https://foo.example/page".to_owned()];

        assert_eq!(resolve_host(Some("example.com"), &urls).unwrap(), "example.com");
        assert_eq!(resolve_host(None, &urls).unwrap(), "foo.example");
        assert_eq!(
            resolve_host(None, &["http://foo.example:8080/a".to_owned()]).unwrap(),
            "foo.example"
        );
    }

    #[test]
    fn test_resolve_host_fail() {
        assert!(matches!(
            resolve_host(None, &["/relative/page".to_owned()]),
            Err(ValidationError::UnparseableUrl { .. })
        ));
        assert!(matches!(
            resolve_host(None, &["mailto:someone@example.com".to_owned()]),
            Err(ValidationError::MissingHost)
        ));
        assert!(matches!(
            resolve_host(None, &[]),
            Err(ValidationError::MissingHost)
        ));
    }
}
