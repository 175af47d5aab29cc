use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, PhoneNumber};

#[derive(Debug, Clone, PartialEq, Eq)]
/// SMS ready to be handed to the gateway.
///
/// Invariant: at least one recipient, and every recipient passed [`PhoneNumber::new`].
pub struct OutboundMessage {
    recipients: Vec<PhoneNumber>,
    text: MessageText,
}

impl OutboundMessage {
    /// Build a message from unvalidated candidate numbers.
    ///
    /// Candidates that are not valid phone numbers are dropped without being reported.
    /// Fails with [`ValidationError::NoValidRecipients`] when nothing is left.
    pub fn build<I, S>(candidates: I, text: MessageText) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut total = 0usize;
        let recipients = candidates
            .into_iter()
            .inspect(|_| total += 1)
            .filter_map(|candidate| PhoneNumber::new(candidate).ok())
            .collect::<Vec<_>>();

        if recipients.is_empty() {
            return Err(ValidationError::NoValidRecipients { candidates: total });
        }

        Ok(Self { recipients, text })
    }

    pub fn recipients(&self) -> &[PhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
