use clap::Parser;
use sitemapnow::{
    bootstrap,
    config::{self, ENGINE_VAR, HOST_VAR, KEY_VAR, LOG_FORMAT_VAR},
    process_sitemap, Options,
};
use tracing::{debug, info};

/// Submit URLs from a sitemap to IndexNow
#[derive(Debug, Parser)]
#[command(name = "sitemapnow", version)]
struct Cli {
    /// URL or file path to a sitemap
    #[arg(short, long, value_name = "LOCATION")]
    sitemap: String,

    /// IndexNow API key
    #[arg(short, long, env = KEY_VAR)]
    key: Option<String>,

    /// Host of the website, if different from the sitemap URLs
    #[arg(long, visible_alias = "site", env = HOST_VAR)]
    host: Option<String>,

    /// Search engine to submit to (default: api.indexnow.org)
    #[arg(short, long, env = ENGINE_VAR)]
    engine: Option<String>,

    /// Log output format: compact, pretty or json
    #[arg(long, env = LOG_FORMAT_VAR)]
    log_format: Option<bootstrap::LogFormat>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();
    bootstrap::init(cli.log_format.unwrap_or_default(), cli.verbose);
    debug!(?dotenv, "environment loaded");

    let options = Options {
        key: cli.key,
        site: cli.host,
        engine: cli.engine,
    };
    let outcome = process_sitemap(&cli.sitemap, &options).await?;
    info!(?outcome, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};
    use std::env;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "sitemapnow",
            "-s",
            "https://example.com/sitemap.xml",
            "-k",
            "test-api-key-12345",
            "--site",
            "example.com",
            "-e",
            "www.bing.com",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.sitemap, "https://example.com/sitemap.xml");
        assert_eq!(cli.key.as_deref(), Some("test-api-key-12345"));
        assert_eq!(cli.host.as_deref(), Some("example.com"));
        assert_eq!(cli.engine.as_deref(), Some("www.bing.com"));
        assert_eq!(cli.log_format, Some(bootstrap::LogFormat::Json));
    }

    #[test]
    fn test_sitemap_required() {
        assert!(Cli::try_parse_from(["sitemapnow", "-k", "test-api-key-12345"]).is_err());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = Cli::try_parse_from(["sitemapnow", "-s", "sitemap.xml", "--log-format", "xml"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    // the only test touching SITEMAPNOW_LOG_FORMAT, others pass the flag explicitly
    #[test]
    fn test_unknown_log_format_from_env_rejected() {
        env::set_var(LOG_FORMAT_VAR, "yaml");
        let res = Cli::try_parse_from(["sitemapnow", "-s", "sitemap.xml"]);
        env::remove_var(LOG_FORMAT_VAR);

        let err = res.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("yaml"), "{err}");
    }
}
