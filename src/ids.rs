use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Request identifier backed by ULID, echoed in the `X-Request-ID` header.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Parse a header value; a missing or invalid one yields a fresh id.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.trim().parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

/// Identifier of a server-side session, carried in the session cookie.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SessionId(ulid::Ulid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Parse a cookie value; `None` when it is not a valid id.
    #[must_use]
    pub fn from_cookie(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(SessionId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_from_header() {
        let id = RequestId::new();
        assert_eq!(RequestId::from_header_or_new(Some(&id.to_string())), id);
        assert_ne!(RequestId::from_header_or_new(Some("garbage")), id);
        assert_ne!(RequestId::from_header_or_new(None), id);
    }

    #[test]
    fn test_cookie_value_parses_back() {
        let id = SessionId::new();
        assert_eq!(SessionId::from_cookie(&id.to_string()), Some(id));
        assert_eq!(SessionId::from_cookie("not-a-ulid"), None);
    }
}
