//! Device layer: line lifecycle and control command dispatch.
//!
//! The host creates one [`SmsDevice`] per configured device, calls
//! [`SmsDevice::on_line_start`] once, then [`SmsDevice::poll`] in its polling loop and
//! [`SmsDevice::send_command`] for every control command addressed to the device.

mod log;
mod phrases;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub use log::{DeviceLog, TracingLog};
pub use phrases::Language;

use crate::client::{GatewayClient, GatewayError, SendOutcome};
use crate::config::{ConfigError, GatewayConfig};
use crate::domain::{
    AddressBook, AddressBookError, Command, CommandType, OutboundMessage, SmsPayload,
    ValidationError, resolve,
};

const DEFAULT_POLL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
/// Host-provided settings of one device.
pub struct DeviceOptions {
    /// Device number; selects the configuration file.
    pub number: u32,
    /// Directory holding `kp_sms_gate_NNN.toml`.
    pub config_dir: PathBuf,
    /// Pause after each sent command, bounds the outbound rate.
    pub send_delay: Duration,
    /// Pause at the end of each polling pass.
    pub poll_delay: Duration,
    /// Per-request HTTP timeout. `None` waits as long as the gateway does.
    pub request_timeout: Option<Duration>,
    pub language: Language,
}

impl DeviceOptions {
    pub fn new(number: u32, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            number,
            config_dir: config_dir.into(),
            send_delay: Duration::ZERO,
            poll_delay: DEFAULT_POLL_DELAY,
            request_timeout: None,
            language: Language::default(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        GatewayConfig::file_name(&self.config_dir, self.number)
    }
}

#[derive(Debug, thiserror::Error)]
/// The device cannot work until the host restarts it.
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] GatewayError),
}

#[derive(Debug, thiserror::Error)]
/// Why a control command was not executed.
pub enum CommandError {
    #[error("device is in fatal state: {reason}")]
    Fatal { reason: String },

    #[error("communication line is not started")]
    NotStarted,

    #[error("illegal command {cmd_num} of type {cmd_type:?}")]
    IllegalCommand { cmd_num: i32, cmd_type: CommandType },

    #[error("incorrect command data")]
    IncorrectData,

    #[error("no valid recipients among {candidates} candidate(s)")]
    NoValidRecipients { candidates: usize },
}

#[derive(Debug)]
/// Operational state of a device.
pub enum ModuleState {
    Uninitialized,
    Ready(GatewayClient),
    /// Configuration could not be loaded; terminal until restart.
    Fatal { reason: String },
}

impl ModuleState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn fatal_reason(&self) -> Option<&str> {
        match self {
            Self::Fatal { reason } => Some(reason.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandStats {
    pub total: u64,
    pub failed: u64,
}

/// SMS gateway device.
pub struct SmsDevice {
    options: DeviceOptions,
    log: Arc<dyn DeviceLog>,
    address_book: Option<Arc<AddressBook>>,
    state: ModuleState,
    status: String,
    write_status: bool,
    last_command_succeeded: bool,
    sent_sms: Option<u64>,
    stats: CommandStats,
}

impl SmsDevice {
    /// Device logging through `tracing`.
    pub fn new(options: DeviceOptions) -> Self {
        let log = Arc::new(TracingLog::new(options.number));
        Self::with_log(options, log)
    }

    pub fn with_log(options: DeviceOptions, log: Arc<dyn DeviceLog>) -> Self {
        Self {
            options,
            log,
            address_book: None,
            state: ModuleState::Uninitialized,
            status: String::new(),
            write_status: false,
            last_command_succeeded: false,
            sent_sms: None,
            stats: CommandStats::default(),
        }
    }

    pub fn state(&self) -> &ModuleState {
        &self.state
    }

    /// Status line shown on the next polling pass.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn last_command_succeeded(&self) -> bool {
        self.last_command_succeeded
    }

    /// "Sent SMS" tag; `None` until the line is started.
    pub fn sent_sms(&self) -> Option<u64> {
        self.sent_sms
    }

    pub fn stats(&self) -> CommandStats {
        self.stats
    }

    /// Take the line's shared address book and load the gateway configuration.
    ///
    /// Without an address book every recipient token is used as a phone number.
    /// A configuration error puts the device into [`ModuleState::Fatal`] for good and is
    /// returned so the host can report it.
    pub fn on_line_start(
        &mut self,
        address_book: Option<Arc<AddressBook>>,
    ) -> Result<(), StartError> {
        let config = GatewayConfig::load(self.options.config_path());
        let timeout = self.options.request_timeout;
        self.start_with(address_book, config, |config| {
            let mut builder = GatewayClient::builder(config);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()
        })
    }

    fn start_with(
        &mut self,
        address_book: Option<Arc<AddressBook>>,
        config: Result<GatewayConfig, ConfigError>,
        connect: impl FnOnce(GatewayConfig) -> Result<GatewayClient, GatewayError>,
    ) -> Result<(), StartError> {
        if !matches!(self.state, ModuleState::Uninitialized) {
            tracing::warn!(device = self.options.number, "line already started");
            return Ok(());
        }

        self.write_status = true;
        self.address_book = address_book;
        self.sent_sms = Some(0);

        let client = config
            .map_err(StartError::from)
            .and_then(|config| connect(config).map_err(StartError::from));

        match client {
            Ok(client) => {
                tracing::info!(
                    device = self.options.number,
                    host = client.config().host.as_str(),
                    address_book = self.address_book.is_some(),
                    "device ready"
                );
                self.state = ModuleState::Ready(client);
                self.status = self.options.language.waiting_for_commands().to_owned();
                Ok(())
            }
            Err(err) => {
                tracing::error!(device = self.options.number, error = %err, "device start failed");
                self.state = ModuleState::Fatal {
                    reason: err.to_string(),
                };
                self.status = self.options.language.sending_impossible().to_owned();
                Err(err)
            }
        }
    }

    /// One polling pass: emit the pending status, then pause.
    pub async fn poll(&mut self) {
        if self.write_status {
            self.log.write_line("");
            self.log.write_line(&self.status);
            self.write_status = false;
        }

        tokio::time::sleep(self.options.poll_delay).await;
    }

    /// Execute a control command. Returns whether it succeeded.
    ///
    /// A command counts as successful once the gateway was called for every recipient,
    /// even if some or all of those requests failed.
    pub async fn send_command(&mut self, cmd: &Command) -> bool {
        self.last_command_succeeded = false;

        let result = self.execute(cmd).await;
        match &result {
            Ok(outcomes) => {
                self.last_command_succeeded = true;
                tracing::info!(
                    device = self.options.number,
                    recipients = outcomes.len(),
                    sent = outcomes.iter().filter(|it| it.is_sent()).count(),
                    "command executed"
                );
            }
            Err(err) => {
                self.log_command_error(err);
                tracing::warn!(device = self.options.number, error = %err, "command rejected");
            }
        }

        if !matches!(result, Err(CommandError::Fatal { .. })) {
            self.write_status = true;
        }

        self.stats.total += 1;
        if !self.last_command_succeeded {
            self.stats.failed += 1;
        }
        self.last_command_succeeded
    }

    async fn execute(&mut self, cmd: &Command) -> Result<Vec<SendOutcome>, CommandError> {
        let client = match &self.state {
            ModuleState::Ready(client) => client.clone(),
            ModuleState::Fatal { reason } => {
                return Err(CommandError::Fatal {
                    reason: reason.clone(),
                });
            }
            ModuleState::Uninitialized => return Err(CommandError::NotStarted),
        };

        if !cmd.is_send_sms() {
            return Err(CommandError::IllegalCommand {
                cmd_num: cmd.cmd_num,
                cmd_type: cmd.cmd_type,
            });
        }

        let payload = SmsPayload::parse(&cmd.data_str()).ok_or(CommandError::IncorrectData)?;
        let candidates = resolve(&payload.recipient, self.address_book.as_deref());
        let message = OutboundMessage::build(candidates, payload.text).map_err(|err| match err {
            ValidationError::NoValidRecipients { candidates } => {
                CommandError::NoValidRecipients { candidates }
            }
            _ => CommandError::IncorrectData,
        })?;

        let outcomes = client.send(&message).await;
        self.log_outcomes(&client, &message, &outcomes);

        tokio::time::sleep(self.options.send_delay).await;
        Ok(outcomes)
    }

    fn log_outcomes(
        &mut self,
        client: &GatewayClient,
        message: &OutboundMessage,
        outcomes: &[SendOutcome],
    ) {
        let language = self.options.language;
        let sender = client.config().sender.as_str();

        for outcome in outcomes {
            match &outcome.result {
                Ok(response) => {
                    self.log.write_line(&language.message_sent(
                        message.text().as_str(),
                        sender,
                        outcome.phone.as_str(),
                    ));
                    self.log
                        .write_line(&language.server_response(&response.body));
                    if let Some(sent) = self.sent_sms.as_mut() {
                        *sent += 1;
                    }
                }
                Err(err) => self.log.write_line(&err.to_string()),
            }
        }
    }

    fn log_command_error(&self, err: &CommandError) {
        let language = self.options.language;
        match err {
            CommandError::Fatal { reason } => {
                self.log.write_line(&self.status);
                self.log.write_line(reason);
            }
            CommandError::NotStarted => self.log.write_line(language.not_started()),
            CommandError::IllegalCommand { .. } => self.log.write_line(language.illegal_command()),
            CommandError::IncorrectData => self.log.write_line(language.incorrect_command_data()),
            CommandError::NoValidRecipients { .. } => {
                self.log.write_line(language.incorrect_recipients());
                self.log.write_line(language.incorrect_command_data());
            }
        }
    }
}

/// Load the address book shared by a line.
///
/// A missing file means the line works without one. A file that cannot be parsed is
/// logged and treated the same way so the line still starts.
pub fn acquire_address_book(
    path: impl AsRef<Path>,
    language: Language,
    log: &dyn DeviceLog,
) -> Option<Arc<AddressBook>> {
    match AddressBook::load(path.as_ref()) {
        Ok(book) => Some(Arc::new(book)),
        Err(AddressBookError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            log.write_line(language.address_book_missing());
            None
        }
        Err(err) => {
            tracing::error!(
                path = %path.as_ref().display(),
                error = %err,
                "address book not loaded"
            );
            log.write_line(&language.address_book_error(&err));
            None
        }
    }
}
