use std::io;
use std::path::PathBuf;

use kp_sms_gate::{
    Command, DeviceOptions, Language, SmsDevice, TracingLog, acquire_address_book,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = std::env::var("KP_SMS_CONFIG_DIR").map(PathBuf::from).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "KP_SMS_CONFIG_DIR environment variable is required",
        )
    })?;
    let number = std::env::var("KP_SMS_DEVICE")
        .ok()
        .and_then(|it| it.parse::<u32>().ok())
        .unwrap_or(1);
    let payload = std::env::args().nth(1).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: send_command '<recipient>;<text>'",
        )
    })?;

    let language = match std::env::var("KP_SMS_LANGUAGE").as_deref() {
        Ok("russian") => Language::Russian,
        _ => Language::English,
    };
    let options = DeviceOptions {
        language,
        ..DeviceOptions::new(number, &config_dir)
    };

    let book = acquire_address_book(
        config_dir.join("address_book.json"),
        language,
        &TracingLog::new(number),
    );

    let mut device = SmsDevice::new(options);
    device.on_line_start(book)?;
    device.poll().await;

    let succeeded = device.send_command(&Command::binary(1, payload)).await;
    device.poll().await;

    println!(
        "succeeded: {succeeded}, sent sms: {:?}",
        device.sent_sms().unwrap_or_default()
    );
    Ok(())
}
