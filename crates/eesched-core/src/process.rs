//! Representation of a simulated process and its lifecycle state.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use eesched_models::power::cpu::CpuPowerModel;
use eesched_models::power::cpu_models::cubic::CubicCpuPowerModel;

/// Lifecycle state of a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProcessState {
    /// Created but not yet admitted to the ready queue.
    New,
    /// Admitted and waiting to be dispatched.
    Ready,
    /// Currently executing on the CPU.
    Running,
    /// Blocked on I/O. Reserved: the single-resource CPU-only model never blocks.
    Waiting,
    /// Finished all required work. Terminal.
    Terminated,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ProcessState::New => write!(f, "new"),
            ProcessState::Ready => write!(f, "ready"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Waiting => write!(f, "waiting"),
            ProcessState::Terminated => write!(f, "terminated"),
        }
    }
}

/// Mutable simulation record of a single process.
///
/// A process is characterized by its burst time (total required CPU-seconds at
/// unit frequency), arrival time and priority (domain convention: 1 is the
/// highest, 0 stands for "not specified"). The priority range is enforced by
/// the code constructing processes, not here.
///
/// Energy drawn while executing is accounted by the process itself via the
/// attached power model, in addition to the scheduler-wide accounting.
#[derive(Clone)]
pub struct Process {
    id: u32,
    burst_time: f64,
    arrival_time: f64,
    priority: i32,
    remaining_time: f64,
    frequency: f64,
    energy_consumed: f64,
    state: ProcessState,
    completion_time: f64,
    turnaround_time: f64,
    waiting_time: f64,
    power_model: Box<dyn CpuPowerModel>,
}

impl Process {
    /// Creates a process with the cubic power model.
    ///
    /// * `id` - Unique process id.
    /// * `burst_time` - Total required CPU time at unit frequency, must be positive.
    /// * `arrival_time` - Time instant the process becomes eligible to run, must be non-negative.
    /// * `priority` - Priority value, 1 is the highest; pass 0 when not specified.
    pub fn new(id: u32, burst_time: f64, arrival_time: f64, priority: i32) -> Self {
        Self::with_power_model(
            id,
            burst_time,
            arrival_time,
            priority,
            Box::new(CubicCpuPowerModel::default()),
        )
    }

    /// Creates a process with a custom power model.
    pub fn with_power_model(
        id: u32,
        burst_time: f64,
        arrival_time: f64,
        priority: i32,
        power_model: Box<dyn CpuPowerModel>,
    ) -> Self {
        assert!(burst_time > 0., "burst time must be positive");
        assert!(arrival_time >= 0., "arrival time cannot be negative");
        Self {
            id,
            burst_time,
            arrival_time,
            priority,
            remaining_time: burst_time,
            frequency: 1.,
            energy_consumed: 0.,
            state: ProcessState::New,
            completion_time: -1.,
            turnaround_time: 0.,
            waiting_time: 0.,
            power_model,
        }
    }

    /// Returns the process id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the total required CPU time at unit frequency.
    pub fn burst_time(&self) -> f64 {
        self.burst_time
    }

    /// Returns the arrival time.
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Returns the priority value (1 is the highest).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the amount of required work still unaccounted, in unit-frequency seconds.
    pub fn remaining_time(&self) -> f64 {
        self.remaining_time
    }

    /// Returns the currently assigned CPU frequency.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Returns the energy consumed by this process so far.
    pub fn energy_consumed(&self) -> f64 {
        self.energy_consumed
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Returns the completion time. Valid only after the process terminated.
    pub fn completion_time(&self) -> f64 {
        self.completion_time
    }

    /// Returns the turnaround time (completion - arrival). Valid only after the process terminated.
    pub fn turnaround_time(&self) -> f64 {
        self.turnaround_time
    }

    /// Returns the waiting time (turnaround - burst). Valid only after the process terminated.
    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    /// Moves the process to a new lifecycle state.
    pub fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }

    /// Assigns the CPU frequency the process will execute at.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    /// Accounts a time slice executed at the given frequency.
    ///
    /// Energy grows by the power drawn at `frequency` times the slice length,
    /// while the remaining work shrinks by `time_slice × frequency` since the
    /// amount of work done scales linearly with frequency. Completion is not
    /// reported here, check [`is_completed`](Self::is_completed) afterwards.
    pub fn advance(&mut self, time_slice: f64, frequency: f64) {
        self.energy_consumed += self.power_model.power(frequency) * time_slice;
        self.remaining_time -= time_slice * frequency;
    }

    /// Returns whether all required work is done.
    pub fn is_completed(&self) -> bool {
        self.remaining_time <= 0.
    }

    /// Records the completion instant and derives turnaround and waiting times.
    ///
    /// Must be called exactly once, at or after the instant the remaining time
    /// first reached zero.
    pub fn mark_completed(&mut self, completion_time: f64) {
        assert!(self.completion_time < 0., "process {} completed twice", self.id);
        self.completion_time = completion_time;
        self.turnaround_time = completion_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use eesched_models::power::cpu_models::constant::ConstantCpuPowerModel;

    use super::*;

    #[test]
    fn test_advance_cubic_energy() {
        let mut p = Process::new(1, 10., 0., 1);
        p.advance(2., 2.);
        // power 2^3 = 8 over 2 seconds, work done 2 * 2 = 4
        assert_abs_diff_eq!(p.energy_consumed(), 16.);
        assert_abs_diff_eq!(p.remaining_time(), 6.);
        assert!(!p.is_completed());
    }

    #[test]
    fn test_advance_custom_power_model() {
        let mut p = Process::with_power_model(1, 3., 0., 1, Box::new(ConstantCpuPowerModel::new(2.)));
        p.advance(1., 1.5);
        assert_abs_diff_eq!(p.energy_consumed(), 2.);
        assert_abs_diff_eq!(p.remaining_time(), 1.5);
    }

    #[test]
    fn test_completion_stats() {
        let mut p = Process::new(1, 4., 1., 1);
        p.advance(4., 1.);
        assert!(p.is_completed());
        p.mark_completed(7.);
        assert_eq!(p.completion_time(), 7.);
        assert_eq!(p.turnaround_time(), 6.);
        assert_eq!(p.waiting_time(), 2.);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProcessState::New.to_string(), "new");
        assert_eq!(ProcessState::Terminated.to_string(), "terminated");
    }

    #[test]
    #[should_panic(expected = "completed twice")]
    fn test_double_completion() {
        let mut p = Process::new(1, 1., 0., 1);
        p.advance(1., 1.);
        p.mark_completed(1.);
        p.mark_completed(2.);
    }

    #[test]
    #[should_panic(expected = "burst time must be positive")]
    fn test_rejects_non_positive_burst() {
        Process::new(1, 0., 0., 1);
    }

    #[test]
    #[should_panic(expected = "arrival time cannot be negative")]
    fn test_rejects_negative_arrival() {
        Process::new(1, 1., -1., 1);
    }
}
