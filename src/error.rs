use reqwest::StatusCode;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid device URL `{url}`")]
    InvalidUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("HTTP transport failed")]
    Transport(#[from] reqwest::Error),

    /// The final response, after at most one re-login, was not `200 OK`.
    #[error("server did not return 200 (got {status})")]
    NotOk { status: StatusCode },

    #[error("failed to decode the response body")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Status code of a [`Error::NotOk`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::NotOk { status } => Some(*status),
            _ => None,
        }
    }
}
