//! Domain layer: strong types with validation and invariants (no I/O besides loading files).

mod address_book;
mod command;
mod message;
mod validation;
mod value;

pub use address_book::{AddressBook, AddressBookError, Contact, ContactGroup, Lookup, resolve};
pub use command::{Command, CommandType, SmsPayload};
pub use message::OutboundMessage;
pub use validation::ValidationError;
pub use value::{GatewayHost, Login, MessageText, Password, PhoneNumber, SenderName};
