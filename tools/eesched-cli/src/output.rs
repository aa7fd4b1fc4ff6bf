//! Console tables and CSV export of simulation results.

use serde::Serialize;

use eesched_core::scheduler::Scheduler;

/// Per-process statistics row of the CSV export.
#[derive(Serialize)]
struct ProcessRow {
    pid: u32,
    burst_time: f64,
    arrival_time: f64,
    completion_time: f64,
    turnaround_time: f64,
    waiting_time: f64,
    energy: f64,
}

/// Prints the per-process and overall statistics tables.
pub fn print_statistics(scheduler: &Scheduler) {
    println!("\n=== Scheduling Statistics ===");
    println!("\nProcess Statistics:");
    println!("PID\tBurst\tArrival\tCompletion\tTurnaround\tWaiting\tEnergy");
    for process in scheduler.completed_processes() {
        println!(
            "{}\t{:.2}\t{:.2}\t{:.2}\t\t{:.2}\t\t{:.2}\t{:.2}",
            process.id(),
            process.burst_time(),
            process.arrival_time(),
            process.completion_time(),
            process.turnaround_time(),
            process.waiting_time(),
            process.energy_consumed()
        );
    }

    let summary = scheduler.summary();
    println!("\nOverall Statistics:");
    println!("Total Energy Consumption: {:.2} units", summary.total_energy);
    println!("Average Turnaround Time: {:.2}", summary.avg_turnaround);
    println!("Average Waiting Time: {:.2}", summary.avg_waiting);
    println!("Total Execution Time: {:.2}", summary.total_time);
}

/// Prints the chronological energy consumption trace.
pub fn print_energy_history(scheduler: &Scheduler) {
    println!("\nEnergy Consumption History:");
    println!("Time\tEnergy Consumption");
    for sample in scheduler.energy_trace() {
        println!("{:.2}\t{:.2}", sample.time, sample.energy);
    }
}

/// Writes per-process statistics to a CSV file.
pub fn export_csv(scheduler: &Scheduler, file_name: &str) {
    let mut writer =
        csv::Writer::from_path(file_name).unwrap_or_else(|_| panic!("Can't create file {}", file_name));
    for process in scheduler.completed_processes() {
        writer
            .serialize(ProcessRow {
                pid: process.id(),
                burst_time: process.burst_time(),
                arrival_time: process.arrival_time(),
                completion_time: process.completion_time(),
                turnaround_time: process.turnaround_time(),
                waiting_time: process.waiting_time(),
                energy: process.energy_consumed(),
            })
            .unwrap();
    }
    writer.flush().unwrap();
    println!("\nPer-process statistics saved to {}", file_name);
}
