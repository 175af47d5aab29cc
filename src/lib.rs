//! SMS gateway device driver for a SCADA communication line.
//!
//! Control commands carrying `recipient;text` are turned into SMS: the recipient is looked
//! up in the line's address book (group, then contact, then literal phone number), invalid
//! numbers are dropped, and the gateway is called with one HTTP GET per remaining number.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use kp_sms_gate::{Command, DeviceOptions, Language, SmsDevice, TracingLog, acquire_address_book};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), kp_sms_gate::StartError> {
//!     let options = DeviceOptions::new(1, "/etc/scada");
//!     let book = acquire_address_book(
//!         "/etc/scada/address_book.json",
//!         Language::English,
//!         &TracingLog::new(1),
//!     );
//!
//!     let mut device = SmsDevice::new(options);
//!     device.on_line_start(book)?;
//!     device.poll().await;
//!
//!     let sent = device
//!         .send_command(&Command::binary(1, "ops-team;Pump 3 stopped"))
//!         .await;
//!     println!("command succeeded: {sent}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod device;
pub mod domain;
mod transport;

pub use client::{GatewayClient, GatewayClientBuilder, GatewayError, HttpResponse, SendOutcome};
pub use config::{ConfigError, GatewayConfig};
pub use device::{
    CommandError, CommandStats, DeviceLog, DeviceOptions, Language, ModuleState, SmsDevice,
    StartError, TracingLog, acquire_address_book,
};
pub use domain::{
    AddressBook, AddressBookError, Command, CommandType, Contact, ContactGroup, GatewayHost,
    Login, Lookup, MessageText, OutboundMessage, Password, PhoneNumber, SenderName, SmsPayload,
    ValidationError, resolve,
};
