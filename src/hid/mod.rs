//! # HID Module
//!
//! Encodes motion vectors as SpaceMouse input reports and delivers them.
//!
//! This module handles:
//! - Report layouts and device profiles (Pro, Wireless, Enterprise)
//! - Little-endian report encoding and decoding
//! - Writing reports to a Linux USB HID gadget (`/dev/hidgN`)
//! - Tracking whether the host has mounted the gadget
//! - A log-only monitor transport for bench testing without USB

pub mod decoder;
pub mod encoder;
pub mod monitor;
pub mod protocol;
pub mod transport;

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{BridgeError, Result};
use transport::{HidTransport, SendStatus};

/// Directory listing the USB device controllers
const UDC_CLASS_DIR: &str = "/sys/class/udc";

/// UDC state string once the host has configured the gadget
const UDC_STATE_CONFIGURED: &str = "configured";

/// `ESHUTDOWN` on Linux, returned by the gadget driver after unplug
const ESHUTDOWN: i32 = 108;

/// USB HID gadget handle
///
/// Writes input reports to the gadget character device. The kernel expects
/// the report id as the first byte when the descriptor declares report ids.
pub struct GadgetHid {
    /// Gadget character device handle
    device: tokio::fs::File,
    /// Device path (e.g., /dev/hidg0)
    device_path: String,
    /// UDC `state` attribute
    state_path: PathBuf,
}

impl std::fmt::Debug for GadgetHid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GadgetHid")
            .field("device_path", &self.device_path)
            .field("state_path", &self.state_path)
            .finish_non_exhaustive()
    }
}

impl GadgetHid {
    /// Open the HID gadget device
    ///
    /// # Arguments
    ///
    /// * `device_path` - Gadget character device (e.g. "/dev/hidg0")
    /// * `udc_state` - UDC state attribute; `None` picks the first controller
    ///   under `/sys/class/udc`
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] if the device cannot be opened or no
    /// UDC state attribute is found
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use spacemouse_bridge::hid::GadgetHid;
    ///
    /// let hid = GadgetHid::open("/dev/hidg0", None)?;
    /// println!("Writing reports to {}", hid.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(device_path: &str, udc_state: Option<&Path>) -> Result<Self> {
        let state_path = match udc_state {
            Some(path) => path.to_path_buf(),
            None => Self::find_udc_state(Path::new(UDC_CLASS_DIR))?,
        };

        if !state_path.exists() {
            return Err(BridgeError::Transport(format!(
                "UDC state attribute not found at {}",
                state_path.display()
            )));
        }

        let file = std::fs::OpenOptions::new()
            .write(true)
            .open(device_path)
            .map_err(|e| BridgeError::Transport(format!("Failed to open {}: {}", device_path, e)))?;

        info!("Opened HID gadget at {} (state: {})", device_path, state_path.display());

        Ok(Self {
            device: tokio::fs::File::from_std(file),
            device_path: device_path.to_string(),
            state_path,
        })
    }

    /// Locate the `state` attribute of the first USB device controller
    fn find_udc_state(class_dir: &Path) -> Result<PathBuf> {
        let mut entries: Vec<_> = std::fs::read_dir(class_dir)
            .map_err(|e| {
                BridgeError::Transport(format!("Failed to read {}: {}", class_dir.display(), e))
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();

        // Deterministic choice when several controllers exist
        entries.sort();

        let udc = entries.into_iter().next().ok_or_else(|| {
            BridgeError::Transport(format!("no USB device controller in {}", class_dir.display()))
        })?;

        debug!("Using UDC {}", udc.display());
        Ok(udc.join("state"))
    }

    /// Get the gadget device path
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

/// Errors meaning the host side is gone rather than the gadget being broken.
fn is_disconnect(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::BrokenPipe | io::ErrorKind::NotConnected
    ) || error.raw_os_error() == Some(ESHUTDOWN)
}

#[async_trait]
impl HidTransport for GadgetHid {
    async fn is_connected(&mut self) -> Result<bool> {
        let state = tokio::fs::read_to_string(&self.state_path)
            .await
            .map_err(|e| {
                BridgeError::Transport(format!(
                    "Failed to read {}: {}",
                    self.state_path.display(),
                    e
                ))
            })?;
        Ok(state.trim() == UDC_STATE_CONFIGURED)
    }

    async fn send_report(&mut self, report_id: u8, payload: &[u8]) -> Result<SendStatus> {
        let mut frame = Vec::with_capacity(1 + payload.len());
        frame.push(report_id);
        frame.extend_from_slice(payload);

        let result = match self.device.write_all(&frame).await {
            Ok(()) => self.device.flush().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!("Sent HID report {} ({} bytes)", report_id, payload.len());
                Ok(SendStatus::Delivered)
            }
            Err(e) if is_disconnect(&e) => {
                warn!("Host disconnected while sending report {}: {}", report_id, e);
                Ok(SendStatus::Disconnected)
            }
            Err(e) => Err(BridgeError::Transport(format!(
                "Failed to write report {}: {}",
                report_id, e
            ))),
        }
    }
}
