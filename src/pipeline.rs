//! # Bridge Pipeline
//!
//! Runs the per-cycle chain
//!
//! ```text
//! Sampler -> Normalizer -> DeadzoneFilter -> MotionMapper -> encoder -> transport
//! ```
//!
//! on a single task. Each cycle completes (or fails) before the next one
//! starts, followed by a fixed delay.
//!
//! A cycle has three possible results:
//!
//! - `Ok(CycleOutcome::Sent(motion))` - reports delivered
//! - `Ok(CycleOutcome::Disconnected)` - host not mounted, nothing sampled or sent
//! - `Err(_)` - hardware fault; the caller must stop
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use spacemouse_bridge::config::Config;
//! use spacemouse_bridge::hid::monitor::MonitorTransport;
//! use spacemouse_bridge::pipeline::{Bridge, PipelineSettings};
//! use spacemouse_bridge::sensor::adc::IioAdc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load("config/default.toml")?;
//! let settings = PipelineSettings::from_config(&config);
//! let adc = IioAdc::open(&config.adc.device_dir, &config.adc.channels, config.adc.raw_max)?;
//!
//! let mut bridge = Bridge::calibrate(adc, MonitorTransport::new(), &settings)?;
//! bridge.run_until(Duration::from_millis(5), tokio::signal::ctrl_c()).await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, Diagnostics};
use crate::error::Result;
use crate::hid::encoder::encode_motion;
use crate::hid::protocol::ReportLayout;
use crate::hid::transport::{HidTransport, SendStatus};
use crate::motion::deadzone::DeadzoneFilter;
use crate::motion::mapper::{InversionProfile, MotionMapper, MotionVector};
use crate::motion::normalize::Normalizer;
use crate::sensor::adc::AdcReader;
use crate::sensor::calibration::CenterPoints;
use crate::sensor::channel::format_channels;
use crate::sensor::sampler::{RawSample, Sampler};

/// Number of cycles between status log messages
pub const LOG_INTERVAL_CYCLES: u64 = 1000;

/// Everything the stages need, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub raw_max: u16,
    pub half_range: i32,
    pub deadzone: i32,
    pub inversion: InversionProfile,
    pub layout: ReportLayout,
    pub samples_per_cycle: u32,
    pub calibration_samples: u32,
    pub diagnostics: Diagnostics,
}

impl PipelineSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            raw_max: config.adc.raw_max,
            half_range: config.motion.half_range,
            deadzone: config.motion.deadzone,
            inversion: config.motion.invert,
            layout: config.hid.profile.layout(),
            samples_per_cycle: config.sampling.samples_per_cycle,
            calibration_samples: config.sampling.calibration_samples,
            diagnostics: config.logging.diagnostics,
        }
    }
}

/// Result of one successful cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Reports for this motion vector were delivered.
    Sent(MotionVector),
    /// Host not connected; cycle skipped.
    Disconnected,
}

/// Counters returned when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub cycles: u64,
    pub sent: u64,
    pub skipped: u64,
}

/// The calibrated pipeline bound to an ADC and a transport.
pub struct Bridge<A, T> {
    sampler: Sampler<A>,
    centers: CenterPoints,
    normalizer: Normalizer,
    deadzone: DeadzoneFilter,
    mapper: MotionMapper,
    layout: ReportLayout,
    samples_per_cycle: u32,
    diagnostics: Diagnostics,
    transport: T,
}

impl<A: AdcReader, T: HidTransport> Bridge<A, T> {
    /// Captures centerpoints and builds the pipeline.
    ///
    /// This is the only place centers are set.
    ///
    /// # Errors
    ///
    /// Fails on any ADC fault during calibration or a degenerate center.
    pub fn calibrate(adc: A, transport: T, settings: &PipelineSettings) -> Result<Self> {
        let mut sampler = Sampler::new(adc);
        let centers =
            CenterPoints::calibrate(&mut sampler, settings.calibration_samples, settings.raw_max)?;

        Ok(Self {
            sampler,
            centers,
            normalizer: Normalizer::new(settings.raw_max, settings.half_range),
            deadzone: DeadzoneFilter::new(settings.deadzone),
            mapper: MotionMapper::new(settings.deadzone, settings.inversion),
            layout: settings.layout,
            samples_per_cycle: settings.samples_per_cycle,
            diagnostics: settings.diagnostics,
            transport,
        })
    }

    #[must_use]
    pub fn centers(&self) -> &CenterPoints {
        &self.centers
    }

    /// Runs the pure stages on one raw sample.
    #[must_use]
    pub fn process(&self, raw: &RawSample) -> MotionVector {
        let normalized = self.normalizer.normalize(raw, &self.centers);
        let filtered = self.deadzone.apply(&normalized);
        let motion = self.mapper.map(&filtered);

        match self.diagnostics {
            Diagnostics::Off => {}
            Diagnostics::Raw => debug!("RAW {}", format_channels(raw)),
            Diagnostics::Normalized => debug!("NRM {}", format_channels(&normalized)),
            Diagnostics::Filtered => debug!("CDZ {}", format_channels(&filtered)),
            Diagnostics::Motion => debug!("{}", format_motion(&motion)),
            Diagnostics::Combined => {
                debug!("CDZ {} || {}", format_channels(&filtered), format_motion(&motion))
            }
        }

        motion
    }

    /// Runs one full cycle.
    ///
    /// # Errors
    ///
    /// Returns the fault if sampling or the transport fails. These are fatal.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        if !self.transport.is_connected().await? {
            return Ok(CycleOutcome::Disconnected);
        }

        let raw = self.sampler.acquire(self.samples_per_cycle)?;
        let motion = self.process(&raw);

        for report in encode_motion(&motion, self.layout) {
            if self.transport.send_report(report.id, &report.payload).await?
                == SendStatus::Disconnected
            {
                return Ok(CycleOutcome::Disconnected);
            }
        }

        Ok(CycleOutcome::Sent(motion))
    }

    /// Cycles until `shutdown` resolves or a fault occurs.
    ///
    /// `shutdown` is only observed between cycles, never mid-cycle.
    ///
    /// # Errors
    ///
    /// Returns the first fatal fault.
    pub async fn run_until<F>(&mut self, delay: Duration, shutdown: F) -> Result<RunStats>
    where
        F: Future,
    {
        tokio::pin!(shutdown);

        let mut stats = RunStats::default();
        let mut last_log = 0u64;
        let mut connected: Option<bool> = None;

        loop {
            let outcome = self.run_cycle().await?;
            stats.cycles += 1;

            let now_connected = match outcome {
                CycleOutcome::Sent(_) => {
                    stats.sent += 1;
                    true
                }
                CycleOutcome::Disconnected => {
                    stats.skipped += 1;
                    false
                }
            };

            if connected != Some(now_connected) {
                if now_connected {
                    info!("Host connected, streaming motion reports");
                } else {
                    warn!("Host not connected, skipping cycles");
                }
                connected = Some(now_connected);
            }

            if stats.cycles - last_log >= LOG_INTERVAL_CYCLES {
                info!(
                    "{} cycles ({} sent, {} skipped)",
                    stats.cycles, stats.sent, stats.skipped
                );
                last_log = stats.cycles;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        Ok(stats)
    }
}

fn format_motion(motion: &MotionVector) -> String {
    format!(
        "TX:{:>6} TY:{:>6} TZ:{:>6} RX:{:>6} RY:{:>6} RZ:{:>6}",
        motion.translation.x,
        motion.translation.y,
        motion.translation.z,
        motion.rotation.x,
        motion.rotation.y,
        motion.rotation.z
    )
}
