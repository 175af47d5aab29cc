//! Drives a device through its public API against a local HTTP endpoint.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use kp_sms_gate::{
    Command, DeviceLog, DeviceOptions, Language, SmsDevice, StartError, acquire_address_book,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Default)]
struct MemoryLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl DeviceLog for MemoryLog {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_owned());
    }
}

/// Answers every request with `id=101` and records its request line.
async fn spawn_gateway() -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let head = String::from_utf8_lossy(&buf);
            if let Some(line) = head.lines().next() {
                seen.lock().unwrap().push(line.to_owned());
            }
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Length: 6\r\nConnection: close\r\n\r\nid=101",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/sms/send"), requests)
}

/// Configuration directory removed when dropped.
struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("kp-sms-gate-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }
}

impl std::ops::Deref for TempDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn write_config(dir: &Path, number: u32, host: &str) {
    let content = format!(
        "host = \"{host}\"\nuser = \"plant7\"\npassword = \"s3cret\"\nuser_display_name = \"SCADA\"\n"
    );
    std::fs::write(dir.join(format!("kp_sms_gate_{number:03}.toml")), content).unwrap();
}

fn options(number: u32, dir: &Path) -> DeviceOptions {
    DeviceOptions {
        poll_delay: std::time::Duration::ZERO,
        ..DeviceOptions::new(number, dir)
    }
}

#[tokio::test]
async fn group_command_reaches_gateway_for_every_member() {
    let (host, requests) = spawn_gateway().await;
    let dir = TempDir::new("group");
    write_config(&dir, 3, &host);
    std::fs::write(
        dir.join("address_book.json"),
        r#"{
          "groups": [
            { "name": "ops-team", "contacts": [
              { "name": "alice", "phone_numbers": ["+15550001111"] },
              { "name": "bob", "phone_numbers": ["+15550002222", "555"] }
            ] }
          ]
        }"#,
    )
    .unwrap();

    let log = MemoryLog::default();
    let book = acquire_address_book(dir.join("address_book.json"), Language::English, &log);
    assert!(book.is_some());

    let mut device = SmsDevice::with_log(options(3, &dir), Arc::new(log.clone()));
    device.on_line_start(book).unwrap();
    device.poll().await;

    assert!(device.send_command(&Command::binary(1, "ops-team;Outage")).await);

    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with(
        "GET /sms/send?login=plant7&password=s3cret&phone=%2B15550001111&text=Outage&sender=SCADA"
    ));
    assert!(requests[1].contains("phone=%2B15550002222"));

    let lines = log.lines();
    assert_eq!(&lines[..2], &["".to_owned(), "Waiting for commands...".to_owned()]);
    assert!(lines.iter().any(|l| l == "Server response: id=101"));
    assert_eq!(device.sent_sms(), Some(2));
}

#[tokio::test]
async fn unreachable_gateway_is_logged_and_command_still_succeeds() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new("unreachable");
    write_config(&dir, 4, &format!("http://{addr}/sms/send"));

    let log = MemoryLog::default();
    let mut device = SmsDevice::with_log(options(4, &dir), Arc::new(log.clone()));
    device.on_line_start(None).unwrap();

    assert!(device.send_command(&Command::binary(1, "+15551234567;Hello")).await);
    let lines = log.lines();
    assert!(lines.iter().any(|l| l.starts_with("transport error")));
    assert!(
        lines.iter().all(|l| !l.contains("s3cret")),
        "password written to device log: {lines:?}"
    );
    assert_eq!(device.sent_sms(), Some(0));
}

#[tokio::test]
async fn missing_configuration_makes_device_fatal() {
    let dir = TempDir::new("fatal");
    let log = MemoryLog::default();
    let mut device = SmsDevice::with_log(options(5, &dir), Arc::new(log.clone()));

    let err = device.on_line_start(None).unwrap_err();
    assert!(matches!(err, StartError::Config(_)));

    assert!(!device.send_command(&Command::binary(1, "+15551234567;Hello")).await);
    assert!(log.lines().iter().any(|l| l == "Sending notifications is impossible"));
    assert_eq!(device.stats().failed, 1);
}
