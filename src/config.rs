use std::path::{Path, PathBuf};

/// IndexNow key.
pub const KEY_VAR: &str = "INDEXNOW_KEY";
/// Host sent along the URL list.
pub const HOST_VAR: &str = "INDEXNOW_HOST";
/// Search engine receiving the submission.
pub const ENGINE_VAR: &str = "INDEXNOW_ENGINE";
pub const LOG_FORMAT_VAR: &str = "SITEMAPNOW_LOG_FORMAT";

/// Loads the nearest `.env` file into the process environment, returning its
/// path. Must run before the command line is parsed so the variables above
/// can back the flags.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn load_dotenv_from(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    dotenvy::from_path(path).ok().map(|_| path.to_owned())
}
