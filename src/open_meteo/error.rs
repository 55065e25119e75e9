use thiserror::Error;

/// Errors from fetching one model alias from the forecast provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode forecast response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
