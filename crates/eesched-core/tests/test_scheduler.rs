use approx::assert_abs_diff_eq;

use eesched_core::config::SchedulerConfig;
use eesched_core::frequency_policy::FixedFrequency;
use eesched_core::process::{Process, ProcessState};
use eesched_core::scheduler::Scheduler;

fn unit_frequency_config(time_quantum: f64) -> SchedulerConfig {
    // min = max pins the frequency to 1.0 regardless of the policy
    SchedulerConfig::new(time_quantum, 1., 1.)
}

#[test]
// Single process, unit frequency, quantum 1: five dispatches of one second,
// energy 1^3 * 5 = 5.
fn test_single_process() {
    let mut scheduler = Scheduler::new(unit_frequency_config(1.));
    scheduler.add_process(Process::new(1, 5., 0., 1));
    scheduler.run();

    let completed = scheduler.completed_processes();
    assert_eq!(completed.len(), 1);
    let p = completed[0];
    assert_eq!(p.state(), ProcessState::Terminated);
    assert_eq!(p.completion_time(), 5.);
    assert_eq!(p.turnaround_time(), 5.);
    assert_eq!(p.waiting_time(), 0.);
    assert_eq!(p.energy_consumed(), 5.);
    assert_eq!(scheduler.energy_trace().len(), 5);
    assert_eq!(scheduler.total_energy_consumed(), 5.);
    assert_eq!(scheduler.current_time(), 5.);
}

#[test]
// Turnaround and waiting times are exact identities derived from the
// completion instant.
fn test_turnaround_and_waiting_identities() {
    let mut scheduler = Scheduler::new(SchedulerConfig::new(1., 2., 0.5));
    scheduler.add_process(Process::new(1, 4., 0., 3));
    scheduler.add_process(Process::new(2, 2., 1., 1));
    scheduler.add_process(Process::new(3, 3., 2., 7));
    scheduler.run();

    let completed = scheduler.completed_processes();
    assert_eq!(completed.len(), 3);
    for p in completed {
        assert_eq!(p.turnaround_time(), p.completion_time() - p.arrival_time());
        assert_eq!(p.waiting_time(), p.turnaround_time() - p.burst_time());
        assert!(p.completion_time() >= p.arrival_time());
        assert!(p.remaining_time() <= 0.);
    }
    for p in scheduler.processes() {
        assert_eq!(p.state(), ProcessState::Terminated);
    }
}

#[test]
// The trace never decreases and its last entry equals the total.
fn test_energy_trace_monotonic() {
    let mut scheduler = Scheduler::new(SchedulerConfig::new(0.7, 2., 0.5));
    scheduler.add_process(Process::new(1, 3., 0., 2));
    scheduler.add_process(Process::new(2, 5., 1., 5));
    scheduler.add_process(Process::new(3, 1., 4., 9));
    scheduler.run();

    let trace = scheduler.energy_trace();
    assert!(!trace.is_empty());
    let mut prev = 0.;
    for sample in trace {
        assert!(sample.energy >= prev);
        prev = sample.energy;
    }
    assert_eq!(trace.last().unwrap().energy, scheduler.total_energy_consumed());
}

#[test]
// Every dispatch runs within the configured frequency range. The trace
// exposes the frequency of each dispatch: power / 1 = (dE/dt) = f^3.
fn test_frequency_within_bounds() {
    let config = SchedulerConfig::new(1., 2., 0.5);
    let mut scheduler = Scheduler::new(config);
    scheduler.add_process(Process::new(1, 6., 0., 1));
    scheduler.add_process(Process::new(2, 2., 0., 10));
    scheduler.add_process(Process::new(3, 4., 3., 5));
    scheduler.run();

    let mut prev_time = 0.;
    let mut prev_energy = 0.;
    for sample in scheduler.energy_trace() {
        let dt = sample.time - prev_time;
        let de = sample.energy - prev_energy;
        if dt > 0. {
            let freq = (de / dt).cbrt();
            assert!(freq >= 0.5 - 1e-9 && freq <= 2. + 1e-9, "frequency {} out of range", freq);
        }
        prev_time = sample.time;
        prev_energy = sample.energy;
    }
}

#[test]
// Identical input and configuration produce identical completion order,
// statistics and energy trace.
fn test_determinism() {
    let run = || {
        let mut scheduler = Scheduler::new(SchedulerConfig::new(0.5, 2., 0.5));
        scheduler.add_process(Process::new(1, 4., 0., 3));
        scheduler.add_process(Process::new(2, 4., 0., 3));
        scheduler.add_process(Process::new(3, 2.5, 1., 1));
        scheduler.add_process(Process::new(4, 1., 6., 8));
        scheduler.run();
        let order: Vec<u32> = scheduler.completed_processes().iter().map(|p| p.id()).collect();
        let trace: Vec<(f64, f64)> = scheduler.energy_trace().iter().map(|s| (s.time, s.energy)).collect();
        (order, trace, scheduler.total_energy_consumed(), scheduler.current_time())
    };
    assert_eq!(run(), run());
}

#[test]
// Among equal priorities the process with more remaining work is dispatched
// first. With bursts 4 and 2 at unit frequency and quantum 1 the long process
// keeps winning until both remainders meet, so it finishes at 5 and the short
// one at 6. FCFS would finish them at 4 and 6, pure SRTF at 6 and 2.
fn test_equal_priority_tie_break() {
    let mut scheduler = Scheduler::new(unit_frequency_config(1.));
    scheduler.add_process(Process::new(1, 4., 0., 1));
    scheduler.add_process(Process::new(2, 2., 0., 1));
    scheduler.run();

    let completed = scheduler.completed_processes();
    let order: Vec<u32> = completed.iter().map(|p| p.id()).collect();
    assert_eq!(order, vec![1, 2]);
    assert_eq!(completed[0].completion_time(), 5.);
    assert_eq!(completed[1].completion_time(), 6.);
}

#[test]
// Lower numeric priority outranks more remaining work.
fn test_priority_outranks_remaining_time() {
    let mut scheduler = Scheduler::new(unit_frequency_config(1.));
    scheduler.add_process(Process::new(1, 3., 0., 5));
    scheduler.add_process(Process::new(2, 1., 0., 1));
    scheduler.run();

    let order: Vec<u32> = scheduler.completed_processes().iter().map(|p| p.id()).collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
// An empty ready queue with a pending arrival jumps simulated time to that
// arrival without charging energy or recording trace samples.
fn test_idle_jump() {
    let mut scheduler = Scheduler::new(unit_frequency_config(1.));
    scheduler.add_process(Process::new(1, 1., 0., 1));
    scheduler.add_process(Process::new(2, 1., 5., 1));
    scheduler.run();

    let trace = scheduler.energy_trace();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace[0].time, 1.);
    assert_eq!(trace[0].energy, 1.);
    assert_eq!(trace[1].time, 6.);
    assert_eq!(trace[1].energy, 2.);
    assert_eq!(scheduler.current_time(), 6.);
    assert_eq!(scheduler.completed_processes()[1].waiting_time(), 0.);
}

#[test]
// A slice computed as remaining / frequency drives the remaining time to
// exactly zero: the process completes in one dispatch and is not re-enqueued.
fn test_exact_zero_completion() {
    let mut scheduler = Scheduler::new(unit_frequency_config(4.));
    scheduler.add_process(Process::new(1, 2., 0., 1));
    scheduler.run();

    let completed = scheduler.completed_processes();
    assert_eq!(completed.len(), 1);
    assert!(completed[0].is_completed());
    assert_eq!(completed[0].remaining_time(), 0.);
    assert_eq!(scheduler.energy_trace().len(), 1);
    assert_eq!(completed[0].completion_time(), 2.);
}

#[test]
// The final slice is shortened so the quantum never overshoots the remaining work.
fn test_last_slice_shorter_than_quantum() {
    let mut scheduler = Scheduler::new(unit_frequency_config(2.));
    scheduler.add_process(Process::new(1, 5., 0., 1));
    scheduler.run();

    assert_eq!(scheduler.energy_trace().len(), 3);
    assert_eq!(scheduler.current_time(), 5.);
    assert_eq!(scheduler.total_energy_consumed(), 5.);
}

#[test]
// The workload average is an admission-time running mean.
fn test_workload_average_at_admission() {
    let mut scheduler = Scheduler::new(SchedulerConfig::new(1., 2., 0.5));
    scheduler.add_process(Process::new(1, 4., 0., 1));
    assert_abs_diff_eq!(scheduler.workload_metrics().avg_workload, 4.);
    scheduler.add_process(Process::new(2, 2., 0., 1));
    assert_abs_diff_eq!(scheduler.workload_metrics().avg_workload, 3.);
    assert_eq!(scheduler.workload_metrics().process_count, 2);
}

#[test]
// A fixed-frequency baseline at half speed: work is done at half rate while
// power drops to 1/8, so the two-second burst takes four seconds but costs
// only 0.5 units of energy.
fn test_fixed_frequency_policy() {
    let config = SchedulerConfig::new(1., 2., 0.5);
    let mut scheduler = Scheduler::with_policy(config, Box::new(FixedFrequency::new(0.5)));
    scheduler.add_process(Process::new(1, 2., 0., 1));
    scheduler.run();

    let completed = scheduler.completed_processes();
    assert_eq!(completed[0].completion_time(), 4.);
    assert_abs_diff_eq!(scheduler.total_energy_consumed(), 0.5);
    assert_eq!(completed[0].frequency(), 0.5);
}

#[test]
// Summary statistics over the completed batch.
fn test_summary_stats() {
    let mut scheduler = Scheduler::new(unit_frequency_config(1.));
    scheduler.add_process(Process::new(1, 1., 0., 1));
    scheduler.add_process(Process::new(2, 1., 0., 2));
    scheduler.run();

    let summary = scheduler.summary();
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.total_time, 2.);
    assert_eq!(summary.total_energy, 2.);
    // completions at 1 and 2: turnarounds 1 and 2, waits 0 and 1
    assert_abs_diff_eq!(summary.avg_turnaround, 1.5);
    assert_abs_diff_eq!(summary.avg_waiting, 0.5);
}
