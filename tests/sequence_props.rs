use banker_sim::{compute_safe_sequence, Dataset, ProcessRecord, Units};
use proptest::prelude::*;

/// Well-formed datasets: non-negative allocations, claims at or above them.
fn dataset_strategy() -> impl Strategy<Value = (Dataset, usize)> {
    (0usize..5, 0usize..8).prop_flat_map(|(width, count)| {
        let row = (
            prop::collection::vec(0i64..6, width),
            prop::collection::vec(0i64..6, width),
        );
        (
            prop::collection::vec(0i64..10, width),
            prop::collection::vec(row, count),
        )
            .prop_map(move |(available, rows)| {
                let records = rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, (allocation, extra))| {
                        let max_claim: Vec<Units> =
                            allocation.iter().zip(&extra).map(|(a, e)| a + e).collect();
                        ProcessRecord::new(format!("P{i}"), allocation, max_claim, 1)
                    })
                    .collect();
                (Dataset::new(records, available), width)
            })
    })
}

proptest! {
    #[test]
    fn safe_order_is_a_permutation((dataset, width) in dataset_strategy()) {
        let mut dataset = dataset;
        let outcome = compute_safe_sequence(&mut dataset, width).unwrap();
        if outcome.safe {
            let mut indices: Vec<usize> = outcome.order.iter().map(|p| p.0).collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..dataset.len()).collect::<Vec<_>>());
        } else {
            prop_assert!(outcome.admitted < dataset.len());
        }
    }

    #[test]
    fn every_admission_fits_its_snapshot((dataset, width) in dataset_strategy()) {
        let mut dataset = dataset;
        let outcome = compute_safe_sequence(&mut dataset, width).unwrap();
        for (rank, id) in outcome.order.iter().enumerate() {
            let need = dataset.processes()[id.0].need();
            prop_assert!(need.iter().zip(&outcome.snapshots[rank]).all(|(n, a)| n <= a));
        }
    }

    #[test]
    fn snapshots_are_monotone((dataset, width) in dataset_strategy()) {
        let mut dataset = dataset;
        let outcome = compute_safe_sequence(&mut dataset, width).unwrap();
        for pair in outcome.snapshots.windows(2) {
            prop_assert!(pair[0].iter().zip(&pair[1]).all(|(a, b)| a <= b));
        }
        if let (Some(last), Some(fin)) = (outcome.snapshots.last(), dataset.final_available()) {
            prop_assert!(last.iter().zip(fin).all(|(a, b)| a <= b));
        }
    }

    #[test]
    fn evaluation_is_deterministic((dataset, width) in dataset_strategy()) {
        let mut a = dataset.clone();
        let mut b = dataset;
        let first = compute_safe_sequence(&mut a, width);
        let second = compute_safe_sequence(&mut b, width);
        prop_assert_eq!(first, second);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn zero_width_is_always_safe((dataset, _width) in dataset_strategy()) {
        let mut dataset = dataset;
        let outcome = compute_safe_sequence(&mut dataset, 0).unwrap();
        prop_assert!(outcome.safe);
    }
}
