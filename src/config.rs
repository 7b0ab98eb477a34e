//! # Dispenser Configuration
//!
//! Settings that shape a scenario run but are not part of the scenario input
//! itself: the fallback outlet count, how minimum thresholds are assigned and
//! whether waiting for an outlet may time out.
//!
//! The binary reads two optional environment overrides:
//!
//! - `DISPENSER_OUTLET_TIMEOUT_MS` - give up on an outlet after this many milliseconds
//! - `DISPENSER_FIXED_THRESHOLD` - use this threshold for every ingredient instead of a random draw

use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tokio::sync::Semaphore;

/// Outlet count used when the scenario does not declare one.
pub const DEFAULT_OUTLETS: usize = 3;

/// Default random threshold range, lower bound inclusive, upper exclusive.
pub const DEFAULT_THRESHOLD_RANGE: (u32, u32) = (10, 30);

pub const OUTLET_TIMEOUT_ENV: &str = "DISPENSER_OUTLET_TIMEOUT_MS";
pub const FIXED_THRESHOLD_ENV: &str = "DISPENSER_FIXED_THRESHOLD";

/// Errors raised while building or validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A dispenser needs at least one outlet.
    #[error("outlet count must be at least 1")]
    ZeroOutlets,

    #[error("outlet count must be at most {max}")]
    TooManyOutlets { max: usize },

    #[error("threshold range {lower}..{upper} is empty")]
    EmptyThresholdRange { lower: u32, upper: u32 },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// How each ingredient's minimum threshold is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// Uniform draw in `lower..upper`, simulating machines that differ per run.
    Random { lower: u32, upper: u32 },
    /// The same threshold for every ingredient.
    Fixed(u32),
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        let (lower, upper) = DEFAULT_THRESHOLD_RANGE;
        Self::Random { lower, upper }
    }
}

impl ThresholdPolicy {
    /// Picks a threshold for one ingredient.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        match *self {
            Self::Random { lower, upper } if upper > lower => rng.gen_range(lower..upper),
            Self::Random { lower, .. } => lower,
            Self::Fixed(threshold) => threshold,
        }
    }
}

/// Runtime settings for a [`ScenarioRunner`](crate::lifecycle::ScenarioRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispenserConfig {
    /// Outlets used when a scenario omits `outlets.count_n`.
    pub outlets: usize,
    pub threshold: ThresholdPolicy,
    /// `None` waits for an outlet for as long as it takes.
    pub outlet_wait_timeout: Option<Duration>,
}

impl Default for DispenserConfig {
    fn default() -> Self {
        Self {
            outlets: DEFAULT_OUTLETS,
            threshold: ThresholdPolicy::default(),
            outlet_wait_timeout: None,
        }
    }
}

impl DispenserConfig {
    pub fn with_outlets(mut self, outlets: usize) -> Self {
        self.outlets = outlets;
        self
    }

    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_outlet_wait_timeout(mut self, timeout: Duration) -> Self {
        self.outlet_wait_timeout = Some(timeout);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_outlets(self.outlets)?;
        if let ThresholdPolicy::Random { lower, upper } = self.threshold {
            if upper <= lower {
                return Err(ConfigError::EmptyThresholdRange { lower, upper });
            }
        }
        Ok(())
    }

    /// Defaults overlaid with the environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(OUTLET_TIMEOUT_ENV) {
            let millis = parse_env(OUTLET_TIMEOUT_ENV, &value)?;
            config.outlet_wait_timeout = Some(Duration::from_millis(millis));
        }
        if let Some(value) = lookup(FIXED_THRESHOLD_ENV) {
            config.threshold = ThresholdPolicy::Fixed(parse_env(FIXED_THRESHOLD_ENV, &value)?);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Checks that `outlets` can back an outlet pool.
pub fn validate_outlets(outlets: usize) -> Result<(), ConfigError> {
    match outlets {
        0 => Err(ConfigError::ZeroOutlets),
        n if n > Semaphore::MAX_PERMITS => Err(ConfigError::TooManyOutlets {
            max: Semaphore::MAX_PERMITS,
        }),
        _ => Ok(()),
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: value.to_string(),
    })
}
