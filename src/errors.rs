use std::path::PathBuf;

/// Every terminal failure of [`crate::process_sitemap`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read sitemap file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not retrieve sitemap from {location}")]
    Network {
        location: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    #[error("Invalid sitemap format")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The submitter's own error is logged where it happens, only this fixed
    /// message reaches the caller.
    #[error("Failed to submit URLs to IndexNow")]
    Submission,

    #[error("Fail to init http client")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("Malformed XML: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "Invalid API key format. The key must have 8-128 characters (a-z, A-Z, 0-9, or -)."
    )]
    InvalidKey,

    #[error(
        "Could not determine host from URLs. Please provide a host using the --host option."
    )]
    UnparseableUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Host not provided. Please specify a host using the --host option.")]
    MissingHost,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            Error::Submission.to_string(),
            "Failed to submit URLs to IndexNow"
        );
        assert_eq!(
            Error::from(ParseError::Malformed("no root element")).to_string(),
            "Invalid sitemap format"
        );
        assert_eq!(
            Error::from(ValidationError::MissingHost).to_string(),
            "Host not provided. Please specify a host using the --host option."
        );
    }

    #[test]
    fn test_parse_error_keep_source() {
        let err = Error::from(ParseError::Malformed("text outside root element"));
        let source = err.source().expect("parse error source");
        assert_eq!(
            source.to_string(),
            "Malformed XML: text outside root element"
        );
    }

    #[test]
    fn test_io_error_display_path() {
        let err = Error::Io {
            path: PathBuf::from("/tmp/missing.xml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "Could not read sitemap file /tmp/missing.xml"
        );
        assert!(err.source().is_some());
    }
}
