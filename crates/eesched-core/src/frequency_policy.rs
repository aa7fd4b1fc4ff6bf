//! CPU frequency selection policies.

use crate::config::SchedulerConfig;
use crate::process::Process;

/// Aggregate workload information maintained by the scheduler and consumed by
/// frequency policies.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkloadMetrics {
    /// Running mean of the remaining time observed at process admission.
    /// Not a true population average: it is never recomputed as processes execute.
    pub avg_workload: f64,
    /// Number of processes admitted to the scheduler.
    pub process_count: usize,
}

/// Trait for implementation of CPU frequency selection policies.
///
/// The policy is invoked once per dispatch, on the process about to run, and
/// returns the frequency to execute it at. The scheduler clamps the result
/// into the configured frequency range before assigning it.
pub trait FrequencyPolicy {
    /// Returns the frequency for the next time slice of `process`.
    fn select_frequency(&self, process: &Process, workload: &WorkloadMetrics, config: &SchedulerConfig) -> f64;
}

////////////////////////////////////////////////////////////////////////////////

/// Workload-adaptive DVFS policy blending three normalized factors with fixed
/// weights:
///
/// - completion ratio (fraction of the original work left) with weight 0.4,
///   inverted so that processes nearer completion get more speed;
/// - workload factor (admission-time average workload over process count)
///   with weight 0.3;
/// - priority factor (`priority / 10`) with weight 0.3. Note that this term
///   scales with the numeric priority value, so domain-low priorities
///   (numerically large) receive the larger boost; the asymmetry is part of
///   the heuristic.
pub struct AdaptiveDvfs;

impl AdaptiveDvfs {
    /// Creates the policy.
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for AdaptiveDvfs {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyPolicy for AdaptiveDvfs {
    fn select_frequency(&self, process: &Process, workload: &WorkloadMetrics, config: &SchedulerConfig) -> f64 {
        let completion_ratio = process.remaining_time() / process.burst_time();
        let workload_factor = workload.avg_workload / workload.process_count.max(1) as f64;
        let priority_factor = process.priority() as f64 / 10.;

        let freq = config.min_frequency
            + (config.max_frequency - config.min_frequency)
                * (0.4 * (1. - completion_ratio) + 0.3 * workload_factor + 0.3 * priority_factor);

        freq.clamp(config.min_frequency, config.max_frequency)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Baseline policy running every process at the same frequency.
pub struct FixedFrequency {
    frequency: f64,
}

impl FixedFrequency {
    /// Creates the policy.
    ///
    /// * `frequency` - The frequency assigned to every dispatch,
    ///   clamped into the configured range.
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }
}

impl FrequencyPolicy for FixedFrequency {
    fn select_frequency(&self, _process: &Process, _workload: &WorkloadMetrics, config: &SchedulerConfig) -> f64 {
        self.frequency.clamp(config.min_frequency, config.max_frequency)
    }
}
