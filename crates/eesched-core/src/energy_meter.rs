//! Energy meter tracks the total energy consumption and its chronological trace.

use serde::Serialize;

/// A single point of the energy consumption trace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnergySample {
    /// Simulated time of the sample.
    pub time: f64,
    /// Cumulative energy consumed up to this time.
    pub energy: f64,
}

/// Energy meter structure.
///
/// One sample is recorded per registration, so the trace is irregularly
/// spaced in time: the scheduler registers once per dispatch, not per fixed
/// interval.
#[derive(Debug, Clone, Default)]
pub struct EnergyMeter {
    energy_consumed: f64,
    trace: Vec<EnergySample>,
}

impl EnergyMeter {
    /// Creates component.
    pub fn new() -> Self {
        Self {
            energy_consumed: 0.,
            trace: Vec::new(),
        }
    }

    /// Invoked once per dispatch to account the energy spent during the time slice.
    pub fn register(&mut self, time: f64, energy: f64) {
        self.energy_consumed += energy;
        self.trace.push(EnergySample {
            time,
            energy: self.energy_consumed,
        });
    }

    /// Returns the total energy consumption.
    pub fn energy_consumed(&self) -> f64 {
        self.energy_consumed
    }

    /// Returns the chronological (time, cumulative energy) trace.
    pub fn trace(&self) -> &[EnergySample] {
        &self.trace
    }
}
