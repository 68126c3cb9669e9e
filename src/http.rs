use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder as RClientBuilder};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::convert::identity;
use tap::Pipe;
use tracing::error;

use crate::errors::Error;

static APP_USER_AGENT: &str = concat!("sitemapnow/", env!("CARGO_PKG_VERSION"),);

/// Shared client for the whole process. Falls back to an untuned client when
/// the TLS backend cannot be initialised with our settings.
pub static CLIENT: Lazy<ClientWithMiddleware> = Lazy::new(|| {
    build_client(identity).unwrap_or_else(|err| {
        error!(?err, "Fail to init http client, use default one");
        wrap(Client::new())
    })
});

pub fn build_client(
    builder: impl FnOnce(RClientBuilder) -> RClientBuilder,
) -> Result<ClientWithMiddleware, Error> {
    let client = Client::builder()
        .user_agent(APP_USER_AGENT)
        .pipe(builder)
        .build()
        .map_err(Error::HttpClient)?;

    Ok(wrap(client))
}

fn wrap(client: Client) -> ClientWithMiddleware {
    ClientBuilder::new(client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_client_smoke_test() {
        Lazy::force(&CLIENT);
    }

    #[test]
    fn test_user_agent_carry_version() {
        assert!(APP_USER_AGENT.starts_with("sitemapnow/"));
        assert!(APP_USER_AGENT.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
