use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account login (`login`).
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query parameter name used by the gateway (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Gateway account password (`password`).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
/// Sender name shown to the recipient (`sender`).
///
/// Passed through as configured; the gateway decides whether it is acceptable.
pub struct SenderName(String);

impl SenderName {
    /// Query parameter name used by the gateway (`sender`).
    pub const FIELD: &'static str = "sender";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Absolute `http`/`https` URL of the gateway send endpoint.
pub struct GatewayHost(Url);

impl GatewayHost {
    /// Configuration key holding the endpoint.
    pub const FIELD: &'static str = "host";

    /// Parse and validate the endpoint URL.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let invalid = || ValidationError::InvalidUrl {
            field: Self::FIELD,
            input: trimmed.to_owned(),
        };
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid());
        }
        Ok(Self(url))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
/// SMS body (`text`).
///
/// Kept exactly as received; length and encoding limits are the gateway's concern.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number accepted by the gateway (`phone`).
///
/// Invariant: starts with `+` and is longer than [`PhoneNumber::MIN_LEN`] characters,
/// the `+` included. No normalization is applied.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Query parameter name used by the gateway (`phone`).
    pub const FIELD: &'static str = "phone";

    /// A number must be strictly longer than this.
    pub const MIN_LEN: usize = 10;

    /// Validate a candidate number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.starts_with('+') && value.chars().count() > Self::MIN_LEN {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidPhoneNumber { input: value })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
