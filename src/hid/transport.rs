//! Trait abstraction for HID report delivery to enable testing

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of handing one report to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    /// Report accepted by the host side.
    Delivered,
    /// Host went away; the report was dropped.
    Disconnected,
}

/// Trait for HID report I/O
#[async_trait]
pub trait HidTransport: Send {
    /// Whether the host has mounted (configured) the device.
    async fn is_connected(&mut self) -> Result<bool>;

    /// Deliver one input report. `payload` excludes the report id.
    ///
    /// Disconnect-class failures return `Ok(SendStatus::Disconnected)`;
    /// anything else is a transport fault.
    async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<SendStatus>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use crate::error::BridgeError;
    use std::sync::{Arc, Mutex};

    /// Mock HID transport for testing
    #[derive(Clone)]
    pub struct MockHidTransport {
        pub sent_reports: Arc<Mutex<Vec<(u8, Vec<u8>)>>>,
        pub connected: Arc<Mutex<bool>>,
        pub send_status: Arc<Mutex<SendStatus>>,
        pub send_error: Arc<Mutex<Option<String>>>,
    }

    impl MockHidTransport {
        pub fn new() -> Self {
            Self {
                sent_reports: Arc::new(Mutex::new(Vec::new())),
                connected: Arc::new(Mutex::new(true)),
                send_status: Arc::new(Mutex::new(SendStatus::Delivered)),
                send_error: Arc::new(Mutex::new(None)),
            }
        }

        pub fn get_sent_reports(&self) -> Vec<(u8, Vec<u8>)> {
            self.sent_reports.lock().unwrap().clone()
        }

        pub fn set_connected(&self, connected: bool) {
            *self.connected.lock().unwrap() = connected;
        }

        pub fn set_send_status(&self, status: SendStatus) {
            *self.send_status.lock().unwrap() = status;
        }

        pub fn set_send_error(&self, error: &str) {
            *self.send_error.lock().unwrap() = Some(error.to_string());
        }
    }

    #[async_trait]
    impl HidTransport for MockHidTransport {
        async fn is_connected(&mut self) -> Result<bool> {
            Ok(*self.connected.lock().unwrap())
        }

        async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<SendStatus> {
            if let Some(error) = self.send_error.lock().unwrap().clone() {
                return Err(BridgeError::Transport(error));
            }
            let status = *self.send_status.lock().unwrap();
            if status == SendStatus::Delivered {
                self.sent_reports.lock().unwrap().push((report_id, payload.to_vec()));
            }
            Ok(status)
        }
    }
}
