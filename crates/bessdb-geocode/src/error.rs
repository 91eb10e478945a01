use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for geocode response: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("candidate coordinate \"{value}\" is not a decimal number")]
    InvalidCoordinate { value: String },

    #[error("cannot build query URL from \"{base_url}\": {reason}")]
    InvalidQueryUrl { base_url: String, reason: String },
}
