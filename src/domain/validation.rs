use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidUrl { field: &'static str, input: String },
    NoValidRecipients { candidates: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::NoValidRecipients { candidates } => {
                write!(f, "no valid recipients among {candidates} candidate(s)")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "login" };
        assert_eq!(err.to_string(), "login must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "555".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: 555");

        let err = ValidationError::InvalidUrl {
            field: "host",
            input: "sms.example".to_owned(),
        };
        assert_eq!(err.to_string(), "host is not a valid URL: sms.example");

        let err = ValidationError::NoValidRecipients { candidates: 2 };
        assert_eq!(err.to_string(), "no valid recipients among 2 candidate(s)");
    }
}
