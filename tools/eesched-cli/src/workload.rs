//! Workload file reader.

use serde::{Deserialize, Serialize};

use eesched_core::process::Process;

/// One process descriptor of a workload file.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ProcessConfig {
    /// Total required CPU time at unit frequency.
    pub burst_time: f64,
    /// Time instant the process becomes eligible to run.
    pub arrival_time: f64,
    /// Priority (1-10, 1 being highest); 0 when not specified.
    #[serde(default)]
    pub priority: i32,
}

/// Loads processes from a YAML file holding a list of process descriptors.
///
/// The file is validated before any process is constructed; a malformed
/// descriptor never reaches the scheduler.
pub fn read_workload(file_name: &str) -> Vec<Process> {
    let raw: Vec<ProcessConfig> = serde_yaml::from_str(
        &std::fs::read_to_string(file_name).unwrap_or_else(|_| panic!("Can't read file {}", file_name)),
    )
    .unwrap_or_else(|_| panic!("Can't parse YAML from file {}", file_name));

    raw.iter().enumerate().for_each(|(i, p)| {
        if p.burst_time <= 0. {
            panic!("{}: process {} has non-positive burst time", file_name, i + 1);
        }
        if p.arrival_time < 0. {
            panic!("{}: process {} has negative arrival time", file_name, i + 1);
        }
        if p.priority != 0 && !(1..=10).contains(&p.priority) {
            panic!("{}: process {} has priority outside 1-10", file_name, i + 1);
        }
    });

    raw.iter()
        .enumerate()
        .map(|(i, p)| Process::new(i as u32 + 1, p.burst_time, p.arrival_time, p.priority))
        .collect()
}
