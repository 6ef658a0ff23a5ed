//! Configuration management for the langmet engine.
//!
//! Configuration is loaded from multiple sources, later ones overriding
//! earlier ones:
//! 1. Default configuration (embedded in the binary)
//! 2. System-wide configuration file (`/etc/langmet/config.toml`)
//! 3. User-specified configuration file
//! 4. Environment variables (prefixed with `LANGMET_`)
//! 5. Command-line arguments
//!
//! Everything the detectors and the facade treat as a default threshold or
//! window lives here, immutable after load, so the engine itself stays free
//! of hidden global state.

use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::drift::{CategoricalDriftOptions, NumericDriftOptions, WindowOptions};
use crate::error::{Error, Result};

/// Command-line arguments shared by every subcommand.
#[derive(Debug, Default, Parser)]
pub struct Args {
    /// Configuration file path
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Trailing lookback for snapshot requests without explicit bounds, in seconds
    #[clap(long)]
    pub lookback_secs: Option<i64>,

    /// PSI threshold above which numeric drift is flagged
    #[clap(long)]
    pub psi_threshold: Option<f64>,

    /// TVD threshold above which categorical drift is flagged
    #[clap(long)]
    pub tvd_threshold: Option<f64>,
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Metrics snapshot configuration
    pub metrics: MetricsSettings,
    /// Drift detector defaults
    pub drift: DriftSettings,
    /// Windowed drift split policy
    pub window: WindowSettings,
}

/// Metrics snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// Default trailing window, in seconds
    #[serde(default = "default_lookback_secs")]
    pub lookback_secs: i64,
}

/// Drift detector defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftSettings {
    #[serde(default = "default_psi_threshold")]
    pub psi_threshold: f64,
    #[serde(default = "default_tvd_threshold")]
    pub tvd_threshold: f64,
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

/// Windowed drift split policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_current_secs")]
    pub current_secs: i64,
    #[serde(default = "default_baseline_secs")]
    pub baseline_secs: i64,
    #[serde(default = "default_min_samples_per_window")]
    pub min_samples_per_window: usize,
}

impl ServiceConfig {
    /// Load configuration from all sources
    pub fn load(args: &Args) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config::File::with_name("/etc/langmet/config.toml").required(false));

        // Load user config if specified
        if let Some(path) = &args.config {
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        // Add environment variables
        builder = builder.add_source(config::Environment::with_prefix("LANGMET").separator("__"));

        let mut config: ServiceConfig = builder.build()?.try_deserialize()?;

        // Override with command line args
        if let Some(lookback) = args.lookback_secs {
            config.metrics.lookback_secs = lookback;
        }
        if let Some(threshold) = args.psi_threshold {
            config.drift.psi_threshold = threshold;
        }
        if let Some(threshold) = args.tvd_threshold {
            config.drift.tvd_threshold = threshold;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range parameters before they reach the detectors.
    pub fn validate(&self) -> Result<()> {
        if self.metrics.lookback_secs <= 0 {
            return Err(Error::InvalidConfig(format!(
                "metrics.lookback_secs must be positive, got {}",
                self.metrics.lookback_secs
            )));
        }
        if self.drift.bin_count == 0 {
            return Err(Error::InvalidConfig("drift.bin_count must be positive".into()));
        }
        if self.drift.epsilon <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "drift.epsilon must be positive, got {}",
                self.drift.epsilon
            )));
        }
        if self.window.current_secs <= 0 {
            return Err(Error::InvalidConfig(format!(
                "window.current_secs must be positive, got {}",
                self.window.current_secs
            )));
        }
        if self.window.baseline_secs <= self.window.current_secs {
            return Err(Error::InvalidConfig(format!(
                "window.baseline_secs ({}) must exceed window.current_secs ({})",
                self.window.baseline_secs, self.window.current_secs
            )));
        }
        Ok(())
    }

    /// Default trailing window for snapshot requests.
    pub fn lookback(&self) -> Duration {
        Duration::seconds(self.metrics.lookback_secs)
    }

    /// Numeric detector options derived from the loaded settings.
    pub fn numeric_options(&self) -> NumericDriftOptions {
        NumericDriftOptions {
            bin_count: self.drift.bin_count,
            epsilon: self.drift.epsilon,
            threshold: self.drift.psi_threshold,
            min_samples: self.drift.min_samples,
        }
    }

    /// Categorical detector options derived from the loaded settings.
    pub fn categorical_options(&self) -> CategoricalDriftOptions {
        CategoricalDriftOptions {
            threshold: self.drift.tvd_threshold,
        }
    }

    /// Window split options derived from the loaded settings.
    pub fn window_options(&self) -> WindowOptions {
        WindowOptions {
            current_window: Duration::seconds(self.window.current_secs),
            baseline_window: Duration::seconds(self.window.baseline_secs),
            min_samples_per_window: self.window.min_samples_per_window,
            numeric: self.numeric_options(),
        }
    }
}

fn default_lookback_secs() -> i64 {
    604_800
}

fn default_psi_threshold() -> f64 {
    0.2
}

fn default_tvd_threshold() -> f64 {
    0.1
}

fn default_bin_count() -> usize {
    10
}

fn default_epsilon() -> f64 {
    1e-4
}

fn default_min_samples() -> usize {
    1
}

fn default_current_secs() -> i64 {
    3600
}

fn default_baseline_secs() -> i64 {
    604_800
}

fn default_min_samples_per_window() -> usize {
    20
}
