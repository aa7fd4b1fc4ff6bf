//! Interactive console input with retry-until-valid prompts.

use std::io::{self, Write};
use std::str::FromStr;

use eesched_core::process::Process;

/// Prompts until the input parses and passes the validity check.
fn prompt<T>(message: &str, retry_message: &str, valid: impl Fn(&T) -> bool) -> T
where
    T: FromStr,
{
    let mut current = message;
    loop {
        print!("{}", current);
        io::stdout().flush().unwrap();
        let mut line = String::new();
        io::stdin().read_line(&mut line).unwrap();
        if let Ok(value) = line.trim().parse::<T>() {
            if valid(&value) {
                return value;
            }
        }
        current = retry_message;
    }
}

/// Asks for the scheduler time quantum.
pub fn read_time_quantum() -> f64 {
    prompt(
        "\nEnter time quantum for the scheduler (in ms): ",
        "Time quantum must be positive. Enter again: ",
        |q: &f64| *q > 0.,
    )
}

/// Asks for the number of processes and then for each process's parameters.
/// Ids are assigned sequentially starting from 1.
pub fn read_processes() -> Vec<Process> {
    let count: u32 = prompt(
        "\nEnter the number of processes: ",
        "Please enter a valid number of processes (greater than 0): ",
        |n: &u32| *n > 0,
    );

    let mut processes = Vec::with_capacity(count as usize);
    for i in 0..count {
        println!("\nProcess {} details:", i + 1);
        let burst_time = prompt(
            "Enter burst time (ms): ",
            "Burst time must be positive. Enter again: ",
            |t: &f64| *t > 0.,
        );
        let arrival_time = prompt(
            "Enter arrival time (ms): ",
            "Arrival time cannot be negative. Enter again: ",
            |t: &f64| *t >= 0.,
        );
        let priority = prompt(
            "Enter priority (1-10, 1 being highest): ",
            "Priority must be between 1 and 10. Enter again: ",
            |p: &i32| (1..=10).contains(p),
        );
        processes.push(Process::new(i + 1, burst_time, arrival_time, priority));
    }
    processes
}

/// Post-run options menu. Returns the chosen entry.
pub fn read_menu_choice() -> u32 {
    println!("\n=== Additional Options ===");
    println!("1. View Energy Consumption History");
    println!("2. Exit");
    prompt(
        "Enter your choice (1-2): ",
        "Invalid choice. Please try again: ",
        |c: &u32| (1..=2).contains(c),
    )
}
