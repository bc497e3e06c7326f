use thiserror::Error;

/// The product reference could not be turned into a `ProductInfo`. Fatal to a whole check.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("could not extract a product id from `{0}`")]
    InvalidReference(String),
    #[error("product request failed: {0}")]
    Transport(#[from] FetchError),
    #[error("no product data returned for id {0}")]
    NotFound(String),
    #[error("product {0} has an empty title")]
    EmptyTitle(String),
}

/// A single page could not be fetched or decoded. Aborts only the current keyword scan.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no rules configured for locale `{0}`")]
    UnknownLocale(String),
    #[error("invalid token pattern for locale `{locale}`: {source}")]
    InvalidPattern {
        locale: String,
        #[source]
        source: regex::Error,
    },
}
