// demos/small_run.rs
use banker_sim::{
    compute_safe_sequence, select_dataset, DatasetSize, MatrixReport, SimulationConfig, Supervisor,
};
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut dataset = select_dataset(DatasetSize::Small);
    let resource_count = dataset.resource_count();
    let outcome = compute_safe_sequence(&mut dataset, resource_count).unwrap();
    print!("{}", MatrixReport::new(&dataset, &outcome));

    // 100 ms per unit keeps the demo short.
    let supervisor =
        Supervisor::new(SimulationConfig::default().with_time_unit(Duration::from_millis(100)));
    let report = supervisor.run_outcome(&dataset, &outcome).unwrap();
    println!("Lock acquisition order (ranks): {:?}", report.acquisition_order());
}
