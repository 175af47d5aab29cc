use crate::domain::value::MessageText;

/// Kind of data carried by a control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Standard,
    Binary,
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Control command delivered by the host.
pub struct Command {
    pub cmd_num: i32,
    pub cmd_type: CommandType,
    pub data: Vec<u8>,
}

impl Command {
    /// Number of the command that sends an SMS.
    pub const SEND_SMS: i32 = 1;

    /// Binary command carrying `payload` as its data.
    pub fn binary(cmd_num: i32, payload: impl Into<String>) -> Self {
        Self {
            cmd_num,
            cmd_type: CommandType::Binary,
            data: payload.into().into_bytes(),
        }
    }

    /// Command data decoded as UTF-8, invalid sequences replaced.
    pub fn data_str(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Whether this is the binary "send SMS" command.
    pub fn is_send_sms(&self) -> bool {
        self.cmd_num == Self::SEND_SMS && self.cmd_type == CommandType::Binary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `recipient;text` payload of a send command.
pub struct SmsPayload {
    /// Phone number, contact name or group name.
    pub recipient: String,
    pub text: MessageText,
}

impl SmsPayload {
    /// Split on the first `;`. Returns `None` when there is no separator.
    pub fn parse(data: &str) -> Option<Self> {
        let (recipient, text) = data.split_once(';')?;
        Some(Self {
            recipient: recipient.to_owned(),
            text: MessageText::new(text),
        })
    }
}
