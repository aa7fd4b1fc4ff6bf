use clap::Parser;

use eesched_core::config::SchedulerConfig;
use eesched_core::frequency_policy::{AdaptiveDvfs, FixedFrequency, FrequencyPolicy};
use eesched_core::scheduler::Scheduler;

mod input;
mod output;
mod workload;

/// Energy-efficient CPU scheduler simulation.
#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Scheduler configuration file in YAML format
    #[clap(short, long)]
    config: Option<String>,

    /// Workload file with process descriptors in YAML format
    /// (skips interactive process entry)
    #[clap(short, long)]
    workload: Option<String>,

    /// Output file for per-process statistics in CSV format
    #[clap(short, long)]
    export: Option<String>,

    /// Run every process at this fixed frequency instead of the adaptive DVFS policy
    #[clap(long)]
    fixed_frequency: Option<f64>,

    /// Print the energy consumption history after the run
    #[clap(long)]
    energy_history: bool,
}

fn init_logger() {
    use env_logger::Builder;
    use std::io::Write;
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn main() {
    init_logger();
    let args = Args::parse();
    let interactive = args.workload.is_none();

    println!("\n=== Energy-Efficient CPU Scheduler ===");

    let config = match &args.config {
        Some(file_name) => SchedulerConfig::from_file(file_name),
        None if interactive => {
            let time_quantum = input::read_time_quantum();
            SchedulerConfig::new(time_quantum, 2., 0.5)
        }
        None => SchedulerConfig::default(),
    };

    log::debug!("using config {:?}", config);

    let policy: Box<dyn FrequencyPolicy> = match args.fixed_frequency {
        Some(frequency) => Box::new(FixedFrequency::new(frequency)),
        None => Box::new(AdaptiveDvfs::new()),
    };
    let mut scheduler = Scheduler::with_policy(config, policy);

    let processes = match &args.workload {
        Some(file_name) => workload::read_workload(file_name),
        None => input::read_processes(),
    };
    for process in processes {
        scheduler.add_process(process);
    }

    println!("\nStarting CPU scheduling simulation...");
    scheduler.run();
    output::print_statistics(&scheduler);

    if let Some(file_name) = &args.export {
        output::export_csv(&scheduler, file_name);
    }

    if args.energy_history {
        output::print_energy_history(&scheduler);
    } else if interactive {
        loop {
            match input::read_menu_choice() {
                1 => output::print_energy_history(&scheduler),
                _ => {
                    println!("\nExiting program...");
                    break;
                }
            }
        }
    }
}
