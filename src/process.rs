use reqwest_middleware::ClientWithMiddleware;
use tracing::{error, instrument};

use crate::{
    errors::Error,
    http::CLIENT,
    indexnow::{SubmissionResult, Submitter},
    loader::Loader,
    reporter::{Reporter, TracingReporter},
    sitemap::extract_urls_at,
    types::{resolve_host, ApiKey, Options},
};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The sitemap had no URLs, nothing was submitted.
    NoUrls,
    /// URLs were found but no key was given, nothing was submitted.
    MissingKey { found: usize },
    Submitted {
        host: String,
        result: SubmissionResult,
    },
}

/// Load a sitemap, extract its URLs and submit them to IndexNow.
pub async fn process_sitemap(location: &str, options: &Options) -> Result<Outcome, Error> {
    Processor::new(CLIENT.clone(), TracingReporter)
        .process(location, options)
        .await
}

#[derive(Debug)]
pub struct Processor<R> {
    client: ClientWithMiddleware,
    reporter: R,
}

impl<R: Reporter> Processor<R> {
    pub fn new(client: ClientWithMiddleware, reporter: R) -> Self {
        Self { client, reporter }
    }

    #[inline]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    #[instrument(skip(self, options), fields(site = ?options.site(), engine = ?options.engine()))]
    pub async fn process(&self, location: &str, options: &Options) -> Result<Outcome, Error> {
        self.reporter.processing(location);

        let loader = Loader::new(self.client.clone());
        let content = loader.load(location).await?;
        let urls = extract_urls_at(&loader, location, &content).await?;

        if urls.is_empty() {
            self.reporter.no_urls();
            return Ok(Outcome::NoUrls);
        }
        self.reporter.urls_found(&urls);

        let Some(key) = options.key() else {
            self.reporter.missing_key();
            return Ok(Outcome::MissingKey { found: urls.len() });
        };
        let key = ApiKey::parse(key)?;
        let host = resolve_host(options.site(), &urls)?;

        self.reporter.submitting(&host, key.as_str());
        let submitter = Submitter::new(self.client.clone(), options.engine());
        let result = match submitter.submit(&urls, &host, &key).await {
            Ok(result) => result,
            Err(err) => {
                error!(?err, "Error submitting URLs to IndexNow");
                return Err(Error::Submission);
            }
        };
        self.reporter.submitted(&result);

        Ok(Outcome::Submitted { host, result })
    }
}
