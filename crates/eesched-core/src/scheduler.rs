//! Energy-efficient preemptive scheduler.

use std::cmp::Reverse;

use log::{debug, info, trace};
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use eesched_models::power::cpu::CpuPowerModel;
use eesched_models::power::cpu_models::cubic::CubicCpuPowerModel;

use crate::config::SchedulerConfig;
use crate::energy_meter::{EnergyMeter, EnergySample};
use crate::frequency_policy::{AdaptiveDvfs, FrequencyPolicy, WorkloadMetrics};
use crate::process::{Process, ProcessState};
use crate::stats::SummaryStats;

/// Ready-queue rank. The queue pops the maximum rank: the lowest numeric
/// priority value wins (1 outranks 10), ties go to the process with more
/// remaining work, exact ties to the lower id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ReadyRank {
    priority: Reverse<i32>,
    remaining_time: OrderedFloat<f64>,
    id: Reverse<u32>,
}

impl ReadyRank {
    fn of(process: &Process) -> Self {
        Self {
            priority: Reverse(process.priority()),
            remaining_time: OrderedFloat(process.remaining_time()),
            id: Reverse(process.id()),
        }
    }
}

/// Simulates preemptive scheduling of a fixed batch of processes with
/// per-dispatch frequency scaling.
///
/// The scheduler owns all processes for the simulation's lifetime: they live
/// in a single arena and the ready queue holds arena indices, so a process
/// outliving its queue membership causes no ownership ambiguity. Time is
/// purely simulated; the whole run is one synchronous loop.
pub struct Scheduler {
    processes: Vec<Process>,
    ready_queue: PriorityQueue<usize, ReadyRank>,
    completed: Vec<usize>,
    energy_meter: EnergyMeter,
    current_time: f64,
    workload: WorkloadMetrics,
    config: SchedulerConfig,
    power_model: Box<dyn CpuPowerModel>,
    frequency_policy: Box<dyn FrequencyPolicy>,
}

impl Scheduler {
    /// Creates a scheduler with the workload-adaptive DVFS policy and the
    /// cubic power model.
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_policy(config, Box::new(AdaptiveDvfs::new()))
    }

    /// Creates a scheduler with a custom frequency policy.
    pub fn with_policy(config: SchedulerConfig, frequency_policy: Box<dyn FrequencyPolicy>) -> Self {
        Self {
            processes: Vec::new(),
            ready_queue: PriorityQueue::new(),
            completed: Vec::new(),
            energy_meter: EnergyMeter::new(),
            current_time: 0.,
            workload: WorkloadMetrics::default(),
            config,
            power_model: Box::new(CubicCpuPowerModel::default()),
            frequency_policy,
        }
    }

    /// Registers a process and updates the running workload average.
    ///
    /// The average must be updated here, at add time, since frequency
    /// decisions for other processes depend on this aggregate.
    pub fn add_process(&mut self, process: Process) {
        self.workload.avg_workload = (self.workload.avg_workload * self.workload.process_count as f64
            + process.remaining_time())
            / (self.workload.process_count + 1) as f64;
        self.workload.process_count += 1;
        debug!(
            "registered process {} (burst {:.3}, arrival {:.3}, priority {})",
            process.id(),
            process.burst_time(),
            process.arrival_time(),
            process.priority()
        );
        self.processes.push(process);
    }

    /// Runs the simulation until every process has terminated.
    pub fn run(&mut self) {
        // one-time ordering by arrival; the admission scan below relies on it
        self.processes
            .sort_by(|a, b| a.arrival_time().total_cmp(&b.arrival_time()));

        let mut next_process = 0;

        while next_process < self.processes.len() || !self.ready_queue.is_empty() {
            while next_process < self.processes.len()
                && self.processes[next_process].arrival_time() <= self.current_time
            {
                let process = &mut self.processes[next_process];
                process.set_state(ProcessState::Ready);
                let rank = ReadyRank::of(process);
                trace!("[{:.3}] process {} admitted", self.current_time, process.id());
                self.ready_queue.push(next_process, rank);
                next_process += 1;
            }

            if self.ready_queue.is_empty() {
                if next_process < self.processes.len() {
                    // idle jump: nothing to run until the next arrival,
                    // no time slice is charged and no trace sample is taken
                    let arrival = self.processes[next_process].arrival_time();
                    debug!("[{:.3}] idle until next arrival at {:.3}", self.current_time, arrival);
                    self.current_time = arrival;
                }
                continue;
            }

            let (index, _) = self.ready_queue.pop().unwrap();
            self.dispatch(index);
        }

        let summary = self.summary();
        info!(
            "[{:.3}] run finished: {} processes, total energy {:.3}",
            self.current_time, summary.completed, summary.total_energy
        );
    }

    /// Executes one time slice of the process at `index`.
    fn dispatch(&mut self, index: usize) {
        let frequency = self
            .frequency_policy
            .select_frequency(&self.processes[index], &self.workload, &self.config)
            .clamp(self.config.min_frequency, self.config.max_frequency);
        let time_slice = self
            .config
            .time_quantum
            .min(self.processes[index].remaining_time() / frequency);
        let energy = self.power_model.power(frequency) * time_slice;

        let process = &mut self.processes[index];
        process.set_state(ProcessState::Running);
        process.set_frequency(frequency);
        process.advance(time_slice, frequency);

        self.current_time += time_slice;
        self.energy_meter.register(self.current_time, energy);
        trace!(
            "[{:.3}] process {} ran for {:.3} at frequency {:.3}",
            self.current_time,
            self.processes[index].id(),
            time_slice,
            frequency
        );

        let process = &mut self.processes[index];
        if process.is_completed() {
            process.set_state(ProcessState::Terminated);
            process.mark_completed(self.current_time);
            debug!(
                "[{:.3}] process {} terminated (waiting {:.3}, energy {:.3})",
                self.current_time,
                process.id(),
                process.waiting_time(),
                process.energy_consumed()
            );
            self.completed.push(index);
        } else {
            process.set_state(ProcessState::Ready);
            let rank = ReadyRank::of(process);
            self.ready_queue.push(index, rank);
        }
    }

    /// Returns the current simulated time.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Returns the total energy consumed by all dispatches.
    pub fn total_energy_consumed(&self) -> f64 {
        self.energy_meter.energy_consumed()
    }

    /// Returns the chronological (time, cumulative energy) trace,
    /// one sample per dispatch.
    pub fn energy_trace(&self) -> &[EnergySample] {
        self.energy_meter.trace()
    }

    /// Returns all processes (ordered by arrival time after [`run`](Self::run)).
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Returns completed processes in completion order.
    pub fn completed_processes(&self) -> Vec<&Process> {
        self.completed.iter().map(|&index| &self.processes[index]).collect()
    }

    /// Returns the workload metrics maintained at admission time.
    pub fn workload_metrics(&self) -> &WorkloadMetrics {
        &self.workload
    }

    /// Returns the summary statistics of the run.
    pub fn summary(&self) -> SummaryStats {
        SummaryStats::collect(
            self.completed.iter().map(|&index| &self.processes[index]),
            self.energy_meter.energy_consumed(),
            self.current_time,
        )
    }
}
