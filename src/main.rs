use banker_sim::menu::{Menu, MenuChoice};
use banker_sim::{
    select_dataset, timed_compute_safe_sequence, DatasetSize, MatrixReport, SimulationConfig,
    Supervisor,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    println!(" _______________________");
    println!("|CPU Deadlock Simulation|");
    println!("|_______________________|");
    println!();

    let supervisor = Supervisor::new(SimulationConfig::from_env());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}Enter menu option: ", Menu);
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                println!("Error reading input: {err}");
                continue;
            }
            None => break,
        };
        println!();

        match line.parse::<MenuChoice>() {
            Ok(MenuChoice::Dataset(size)) => run(&supervisor, size),
            Ok(MenuChoice::Exit) => break,
            Err(err) => println!("{err}. Please try again."),
        }
    }
}

fn run(supervisor: &Supervisor, size: DatasetSize) {
    let mut dataset = select_dataset(size);
    let resource_count = dataset.resource_count();

    let (outcome, nanos) = match timed_compute_safe_sequence(&mut dataset, resource_count) {
        Ok(result) => result,
        Err(err) => {
            println!("Safety check failed: {err}");
            return;
        }
    };

    print!("{}", MatrixReport::new(&dataset, &outcome));
    println!("Banker's algorithm runtime: {nanos}ns");

    match supervisor.run_outcome(&dataset, &outcome) {
        Ok(report) => println!(
            "{} of {} processes finished running.",
            report.completed_count(),
            report.outcomes.len()
        ),
        Err(err) => println!("Skipping execution: {err}"),
    }
}
