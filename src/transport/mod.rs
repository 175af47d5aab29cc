//! Transport layer: gateway wire-format details.

mod send_sms;

pub use send_sms::send_sms_url;
