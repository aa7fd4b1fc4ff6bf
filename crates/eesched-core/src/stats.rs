//! Aggregate statistics over completed processes.

use serde::Serialize;

use crate::process::Process;

/// Summary of a finished simulation run.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct SummaryStats {
    /// Number of completed processes.
    pub completed: usize,
    /// Total energy consumed by all dispatches.
    pub total_energy: f64,
    /// Total elapsed simulated time.
    pub total_time: f64,
    /// Average turnaround time over completed processes.
    pub avg_turnaround: f64,
    /// Average waiting time over completed processes.
    pub avg_waiting: f64,
}

impl SummaryStats {
    /// Accumulates the summary over the given completed processes.
    pub fn collect<'a>(
        completed: impl Iterator<Item = &'a Process>,
        total_energy: f64,
        total_time: f64,
    ) -> Self {
        let mut count = 0;
        let mut total_turnaround = 0.;
        let mut total_waiting = 0.;
        for process in completed {
            total_turnaround += process.turnaround_time();
            total_waiting += process.waiting_time();
            count += 1;
        }
        let denom = count.max(1) as f64;
        Self {
            completed: count,
            total_energy,
            total_time,
            avg_turnaround: total_turnaround / denom,
            avg_waiting: total_waiting / denom,
        }
    }
}
