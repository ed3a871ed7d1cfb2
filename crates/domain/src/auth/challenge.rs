//! Classification of `WWW-Authenticate` challenges on 401 responses

const EXPIRED_MARKER: &str = "The access token expired";
const INVALID_MARKER: &str = "The access token is invalid";

/// What a 401 challenge says about the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChallenge {
    /// The token expired; a refresh can fix it.
    Expired,
    /// The token itself is invalid; only a new login can fix it.
    Invalid,
    /// No recognizable detail. Treated as non-refreshable.
    Unrecognized,
}

impl AuthChallenge {
    /// Classifies a `WWW-Authenticate` header value (absent header included).
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.contains(EXPIRED_MARKER) => Self::Expired,
            Some(v) if v.contains(INVALID_MARKER) => Self::Invalid,
            _ => Self::Unrecognized,
        }
    }
}
