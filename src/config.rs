use crate::error::{Error, Result};

/// Default number of wireless channels available for scheduling.
pub const DEFAULT_NUM_CHANNELS: u16 = 16;
/// Default minimum packet reception rate assumed for every link.
pub const DEFAULT_MIN_PACKET_RECEPTION_RATE: f64 = 0.9;
/// Default end-to-end reliability target for all flows.
pub const DEFAULT_E2E: f64 = 0.99;
/// Default number of faults tolerated per edge per period.
pub const DEFAULT_NUM_FAULTS: i64 = 0;

/// Immutable per-run analysis parameters.
///
/// One value of this struct is built at process start (or by a test) and
/// passed into the engine explicitly; there is no ambient global state.
/// `num_faults > 0` selects the fixed-fault budgeting policy, otherwise the
/// probabilistic E2E policy applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    pub min_packet_reception_rate: f64,
    pub e2e: f64,
    pub num_faults: i64,
    pub num_channels: u16,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            min_packet_reception_rate: DEFAULT_MIN_PACKET_RECEPTION_RATE,
            e2e: DEFAULT_E2E,
            num_faults: DEFAULT_NUM_FAULTS,
            num_channels: DEFAULT_NUM_CHANNELS,
        }
    }
}

impl RunConfig {
    pub fn new(min_packet_reception_rate: f64, e2e: f64, num_faults: i64) -> Result<Self> {
        let config = RunConfig {
            min_packet_reception_rate,
            e2e,
            num_faults,
            num_channels: DEFAULT_NUM_CHANNELS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the parameters lie in the ranges the budgeting loop is
    /// guaranteed to converge for: M in (0, 1], e2e in (0, 1], num_faults >= 0.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_packet_reception_rate > 0.0 && self.min_packet_reception_rate <= 1.0) {
            return Err(Error::InvalidParameters(format!(
                "min packet reception rate must be in (0, 1], got {}",
                self.min_packet_reception_rate
            )));
        }
        if !(self.e2e > 0.0 && self.e2e <= 1.0) {
            return Err(Error::InvalidParameters(format!("e2e target must be in (0, 1], got {}", self.e2e)));
        }
        if self.num_faults < 0 {
            return Err(Error::InvalidParameters(format!("num_faults must be >= 0, got {}", self.num_faults)));
        }
        Ok(())
    }

    pub fn uses_fixed_fault_policy(&self) -> bool {
        self.num_faults > 0
    }
}
