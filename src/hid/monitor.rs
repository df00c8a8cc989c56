//! Log-only transport for running the pipeline on a bench without USB.
//!
//! Always reports itself as connected and prints each report's axes.

use async_trait::async_trait;
use tracing::info;

use super::decoder::decode_axes;
use super::protocol::AXIS_REPORT_SIZE;
use super::transport::{HidTransport, SendStatus};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct MonitorTransport {
    reports: u64,
}

impl MonitorTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports logged so far.
    #[must_use]
    pub fn report_count(&self) -> u64 {
        self.reports
    }
}

#[async_trait]
impl HidTransport for MonitorTransport {
    async fn is_connected(&mut self) -> Result<bool> {
        Ok(true)
    }

    async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<SendStatus> {
        let mut line = format!("report {}:", report_id);
        for chunk in payload.chunks(AXIS_REPORT_SIZE) {
            let axes = decode_axes(chunk)?;
            line.push_str(&format!(" [{:>6} {:>6} {:>6}]", axes.x, axes.y, axes.z));
        }
        info!("{}", line);

        self.reports += 1;
        Ok(SendStatus::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_connected() {
        let mut monitor = MonitorTransport::new();
        assert!(monitor.is_connected().await.unwrap());
    }

    #[tokio::test]
    async fn test_counts_reports() {
        let mut monitor = MonitorTransport::new();
        monitor.send_report(1, &[0; 12]).await.unwrap();
        monitor.send_report(2, &[0; 6]).await.unwrap();
        assert_eq!(monitor.report_count(), 2);
    }

    #[tokio::test]
    async fn test_rejects_ragged_payload() {
        let mut monitor = MonitorTransport::new();
        assert!(monitor.send_report(1, &[0; 8]).await.is_err());
        assert_eq!(monitor.report_count(), 0);
    }
}
