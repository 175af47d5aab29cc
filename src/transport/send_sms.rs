use url::Url;

use crate::config::GatewayConfig;
use crate::domain::{Login, MessageText, Password, PhoneNumber, SenderName};

/// Query parameters for one SMS to one number, in the order the gateway documents them.
pub fn encode_send_sms_query(
    config: &GatewayConfig,
    phone: &PhoneNumber,
    text: &MessageText,
) -> Vec<(&'static str, String)> {
    vec![
        (Login::FIELD, config.login.as_str().to_owned()),
        (Password::FIELD, config.password.as_str().to_owned()),
        (PhoneNumber::FIELD, phone.as_str().to_owned()),
        (MessageText::FIELD, text.as_str().to_owned()),
        (SenderName::FIELD, config.sender.as_str().to_owned()),
    ]
}

/// Endpoint URL with the send parameters appended to any query it already has.
pub fn send_sms_url(config: &GatewayConfig, phone: &PhoneNumber, text: &MessageText) -> Url {
    let mut url = config.host.url().clone();
    url.query_pairs_mut()
        .extend_pairs(encode_send_sms_query(config, phone, text));
    url
}
