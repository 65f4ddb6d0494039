use banker_sim::{
    compute_safe_sequence, select_dataset, DatasetBuilder, DatasetSize, ProcessId,
    SafetyOutcome, SimulationConfig, Supervisor, SupervisorError,
};
use std::time::Duration;

fn assert_admissions_fit(dataset: &banker_sim::Dataset, outcome: &SafetyOutcome) {
    for (rank, id) in outcome.order.iter().enumerate() {
        let need = dataset.processes()[id.0].need();
        let snapshot = &outcome.snapshots[rank];
        assert!(
            need.iter().zip(snapshot).all(|(n, a)| n <= a),
            "rank {rank}: need {need:?} exceeds {snapshot:?}"
        );
    }
}

#[test]
fn small_preset_is_safe() {
    let mut dataset = select_dataset(DatasetSize::Small);
    let outcome = compute_safe_sequence(&mut dataset, 5).unwrap();
    assert!(outcome.safe);
    assert_eq!(outcome.order.len(), 6);
    assert_eq!(
        outcome.order,
        [3, 0, 1, 2, 4, 5].map(ProcessId).to_vec()
    );
    assert_admissions_fit(&dataset, &outcome);
    assert_eq!(dataset.final_available(), Some(&[3, 15, 14, 21, 25][..]));
}

#[test]
fn medium_preset_stalls_after_nine() {
    let mut dataset = select_dataset(DatasetSize::Medium);
    let outcome = compute_safe_sequence(&mut dataset, 5).unwrap();
    assert!(!outcome.safe);
    assert_eq!(outcome.admitted, 9);
    assert!(outcome.safe_order().is_none());
    // P8 and P9 claim more of the first type than will ever be free.
    assert!(!dataset.processes()[8].completed());
    assert!(!dataset.processes()[9].completed());
    assert_eq!(dataset.final_available(), Some(&[3, 26, 23, 43, 46][..]));
}

#[test]
fn large_preset_is_safe_despite_negative_need() {
    let mut dataset = select_dataset(DatasetSize::Large);
    let outcome = compute_safe_sequence(&mut dataset, 5).unwrap();
    assert!(outcome.safe);
    assert_eq!(outcome.order.len(), 21);
    assert_eq!(dataset.processes()[5].need()[4], -5);
    assert_admissions_fit(&dataset, &outcome);
    assert_eq!(dataset.final_available(), Some(&[69, 91, 47, 92, 101][..]));
}

#[test]
fn snapshots_never_shrink() {
    for size in DatasetSize::ALL {
        let mut dataset = select_dataset(size);
        let outcome = compute_safe_sequence(&mut dataset, 5).unwrap();
        for pair in outcome.snapshots.windows(2) {
            assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| a <= b));
        }
    }
}

#[test]
fn ranks_are_unique_when_safe() {
    let mut dataset = select_dataset(DatasetSize::Large);
    compute_safe_sequence(&mut dataset, 5).unwrap();
    let mut ranks: Vec<usize> = dataset
        .processes()
        .iter()
        .map(|p| p.sequence_position().unwrap())
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, (0..21).collect::<Vec<_>>());
}

#[test]
fn independent_copies_agree() {
    for size in DatasetSize::ALL {
        let mut a = select_dataset(size);
        let mut b = select_dataset(size);
        let first = compute_safe_sequence(&mut a, 5).unwrap();
        let second = compute_safe_sequence(&mut b, 5).unwrap();
        assert_eq!(first, second);
        assert_eq!(a, b);
    }
}

#[test]
fn repeated_evaluation_of_one_dataset_agrees() {
    for size in DatasetSize::ALL {
        let mut dataset = select_dataset(size);
        let first = compute_safe_sequence(&mut dataset, 5).unwrap();
        let second = compute_safe_sequence(&mut dataset, 5).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn sentinel_only_dataset_is_safe() {
    let mut dataset = DatasetBuilder::new(vec![4, 4, 4]).build().unwrap();
    let outcome = compute_safe_sequence(&mut dataset, 3).unwrap();
    assert!(outcome.safe);
    assert!(outcome.order.is_empty());
}

#[test]
fn zero_resource_types_ignore_allocations() {
    let mut dataset = select_dataset(DatasetSize::Medium);
    let outcome = compute_safe_sequence(&mut dataset, 0).unwrap();
    assert!(outcome.safe);
    assert_eq!(outcome.order, (0..11).map(ProcessId).collect::<Vec<_>>());
}

#[test]
fn nothing_fits_at_rank_zero() {
    let mut dataset = DatasetBuilder::new(vec![0, 0])
        .process("A", vec![1, 0], vec![2, 0], 1)
        .process("B", vec![0, 1], vec![0, 2], 1)
        .process("C", vec![1, 1], vec![2, 2], 1)
        .build()
        .unwrap();
    let outcome = compute_safe_sequence(&mut dataset, 2).unwrap();
    assert!(!outcome.safe);
    assert_eq!(outcome.admitted, 0);
    assert!(dataset.processes().iter().all(|p| !p.completed()));

    // The caller detects the verdict and never executes.
    let supervisor =
        Supervisor::new(SimulationConfig::default().with_time_unit(Duration::from_millis(1)));
    assert_eq!(
        supervisor.run_outcome(&dataset, &outcome),
        Err(SupervisorError::UnsafeState {
            admitted: 0,
            total: 3
        })
    );
}
