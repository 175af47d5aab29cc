//! Device log sink.

/// Free-text log of one device, provided by the host.
pub trait DeviceLog: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Forwards every line to `tracing` at `INFO`, tagged with the device number.
#[derive(Debug, Clone, Copy)]
pub struct TracingLog {
    device: u32,
}

impl TracingLog {
    pub fn new(device: u32) -> Self {
        Self { device }
    }
}

impl DeviceLog for TracingLog {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "kp_sms_gate::device", device = self.device, "{line}");
    }
}
