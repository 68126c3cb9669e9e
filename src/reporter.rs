use tracing::{info, warn};

use crate::indexnow::SubmissionResult;

const SAMPLE_SIZE: usize = 5;

/// Progress events of [`crate::process::Processor`].
pub trait Reporter: Send + Sync {
    fn processing(&self, location: &str);

    fn urls_found(&self, urls: &[String]);

    fn no_urls(&self);

    fn missing_key(&self);

    fn submitting(&self, host: &str, key: &str);

    fn submitted(&self, result: &SubmissionResult);
}

/// Reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn processing(&self, location: &str) {
        info!("Processing sitemap from {location}");
    }

    fn urls_found(&self, urls: &[String]) {
        info!("Found {} URLs in the sitemap.", urls.len());
        for (i, url) in urls.iter().take(SAMPLE_SIZE).enumerate() {
            info!("  {}. {url}", i + 1);
        }
        if urls.len() > SAMPLE_SIZE {
            info!("  ... and {} more", urls.len() - SAMPLE_SIZE);
        }
    }

    fn no_urls(&self) {
        warn!("No URLs found in the sitemap.");
    }

    fn missing_key(&self) {
        warn!("IndexNow API key not provided. Please provide a key using the -k or --key option.");
    }

    fn submitting(&self, host: &str, key: &str) {
        info!("Submitting URLs to IndexNow for host: {host}");
        warn!("Note: Ensure you have a key file at https://{host}/{key}.txt containing your key!");
    }

    fn submitted(&self, result: &SubmissionResult) {
        match result {
            SubmissionResult::Single(body) => info!(body = %body, "IndexNow submission result"),
            SubmissionResult::Batches(bodies) => {
                info!(?bodies, "IndexNow submission result")
            }
        }
        info!("All URLs submitted successfully!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_reporter_is_object_safe() {
        let reporter: Box<dyn Reporter> = Box::new(TracingReporter);
        reporter.processing("sitemap.xml");
        reporter.urls_found(&(0..7).map(|i| i.to_string()).collect::<Vec<_>>());
        reporter.submitted(&SubmissionResult::Batches(vec![String::new()]));
    }
}
