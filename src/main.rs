//! # SpaceMouse Bridge
//!
//! Turn four two-axis analog joysticks into a 6-DOF SpaceMouse.
//!
//! This application samples the knobs through a Linux IIO ADC and presents
//! the result to a USB host as a SpaceMouse HID device.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use spacemouse_bridge::config::Config;
use spacemouse_bridge::error::BridgeError;
use spacemouse_bridge::hid::monitor::MonitorTransport;
use spacemouse_bridge::hid::transport::HidTransport;
use spacemouse_bridge::hid::GadgetHid;
use spacemouse_bridge::pipeline::{Bridge, PipelineSettings, RunStats};
use spacemouse_bridge::sensor::adc::{AdcReader, IioAdc};

/// Config file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for the SpaceMouse bridge
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load and validate the configuration
///    - Open the ADC and the HID transport
///    - Calibrate centerpoints (knobs must be at rest)
///
/// 2. **Main Loop**
///    - Sample, map and send one motion report per cycle
///    - Skip cycles while the host has not mounted the device
///    - Log status every 1000 cycles
///
/// 3. **Shutdown**
///    - Ctrl+C stops the loop between cycles
///    - An ADC or transport fault stops the loop and exits non-zero
///
/// # Examples
///
/// ```bash
/// spacemouse-bridge /etc/spacemouse-bridge.toml
/// ```
///
/// Expected output:
/// ```text
/// INFO spacemouse_bridge: SpaceMouse Bridge v0.1.0 starting...
/// INFO spacemouse_bridge: Emulating SpaceMouse Enterprise (256f:c633)
/// INFO spacemouse_bridge::sensor::calibration: Calibrating centerpoints from 100 samples, keep the knobs still
/// INFO spacemouse_bridge::pipeline: Host connected, streaming motion reports
/// ```
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("SpaceMouse Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;
    info!("Loaded configuration from {}", config_path);
    info!("Emulating {}", config.hid.profile);

    let settings = PipelineSettings::from_config(&config);
    let delay = Duration::from_millis(config.sampling.cycle_delay_ms);

    let adc = IioAdc::open(&config.adc.device_dir, &config.adc.channels, config.adc.raw_max)?;

    // Register before calibration, which blocks the runtime
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, shutting down...");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                warn!("Failed to listen for Ctrl+C: {}", e);
                // Keep the sender alive so the loop never sees a shutdown
                std::future::pending::<()>().await;
            }
        }
    });
    tokio::task::yield_now().await;

    let shutdown = async {
        let _ = shutdown_rx.await;
    };

    let stats = if config.hid.enabled {
        let udc_state = (!config.hid.udc_state.is_empty())
            .then(|| std::path::Path::new(&config.hid.udc_state));
        let hid = GadgetHid::open(&config.hid.device, udc_state)?;
        run(adc, hid, &settings, delay, shutdown).await?
    } else {
        warn!("HID output disabled, logging reports only");
        run(adc, MonitorTransport::new(), &settings, delay, shutdown).await?
    };

    info!(
        "Total cycles: {} ({} sent, {} skipped)",
        stats.cycles, stats.sent, stats.skipped
    );

    Ok(())
}

/// Calibrate and cycle until Ctrl+C or a fault
async fn run<A, T, F>(
    adc: A,
    transport: T,
    settings: &PipelineSettings,
    delay: Duration,
    shutdown: F,
) -> Result<RunStats>
where
    A: AdcReader,
    T: HidTransport,
    F: Future<Output = ()>,
{
    let mut bridge = Bridge::calibrate(adc, transport, settings).map_err(|e| {
        report_fault(&e);
        anyhow::Error::new(e).context("Calibration failed")
    })?;

    info!("Starting motion loop ({}ms cycle delay)", delay.as_millis());
    info!("Press Ctrl+C to exit");

    match bridge.run_until(delay, shutdown).await {
        Ok(stats) => Ok(stats),
        Err(e) => {
            report_fault(&e);
            Err(e.into())
        }
    }
}

fn report_fault(e: &BridgeError) {
    if e.is_fatal() {
        error!("Hardware fault, stopping: {}", e);
    } else {
        error!("Configuration fault: {}", e);
    }
}
