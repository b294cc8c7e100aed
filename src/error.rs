/// Everything that can stop a run.
///
/// A single game with no store payload is not an error; that case degrades
/// to a placeholder in the cache layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request rejected (check the API key, or the friends list is private)")]
    Unauthorized,

    #[error("rate limited by the Steam API, try again later")]
    RateLimited,

    #[error("game library of {0} is private")]
    PrivateProfile(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("config error: {0}")]
    Config(String),
}
