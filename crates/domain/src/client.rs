use std::fmt::{Display, Formatter};

const UNKNOWN_CLIENT: &str = "unknown";

/// Best-effort network identity of the caller.
///
/// Usually derived from forwarding headers, so it deters casual abuse but is
/// not an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIp(String);

impl ClientIp {
    /// Creates a client identity from a raw address, falling back to `unknown`
    /// when the value is blank.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Self::unknown();
        }

        Self(trimmed.to_owned())
    }

    /// Identity shared by every caller whose address could not be determined.
    #[must_use]
    pub fn unknown() -> Self {
        Self(UNKNOWN_CLIENT.to_owned())
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ClientIp {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}
