use super::*;
use crate::error::MiningError;
use crate::observer::MiningStats;
use std::collections::BTreeMap;

fn pasquier_like() -> Vec<Vec<Item>> {
    vec![vec![1, 2, 3], vec![1, 2, 4], vec![1, 2], vec![1, 3], vec![2, 3]]
}

fn expected_frequent() -> BTreeMap<Vec<Item>, usize> {
    [
        (vec![1], 4),
        (vec![2], 4),
        (vec![3], 3),
        (vec![1, 2], 3),
        (vec![1, 3], 2),
        (vec![2, 3], 2),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_worked_example_every_strategy() {
    for strategy in Strategy::ALL {
        let result = mine(pasquier_like(), 0.4, false, strategy).unwrap();
        assert_eq!(result.to_map(), expected_frequent(), "{strategy}");
        assert_eq!(result.len(), 6, "{strategy} produced duplicates");

        let counts: Vec<_> = result.count_by_size().into_iter().collect();
        assert_eq!(counts, vec![(1, 3), (2, 3)], "{strategy}");
    }
}

#[test]
fn test_worked_example_closed() {
    // Every frequent itemset is closed at this threshold
    for strategy in Strategy::ALL {
        let result = mine(pasquier_like(), 0.4, true, strategy).unwrap();
        assert_eq!(result.to_map(), expected_frequent(), "{strategy}");
    }
}

#[test]
fn test_closed_filter_drops_absorbed_itemsets() {
    // {1} and {2} always occur together; {3} only with both of them
    let database = vec![vec![1, 2, 3], vec![1, 2], vec![1, 2, 3], vec![4]];
    let expected: BTreeMap<Vec<Item>, usize> =
        [(vec![1, 2], 3), (vec![1, 2, 3], 2)].into_iter().collect();

    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 0.5, true, strategy).unwrap();
        assert_eq!(result.to_map(), expected, "{strategy}");
    }
}

#[test]
fn test_non_closed_prefix_still_explored() {
    // {5} is absorbed by {5,6}, but {5,6,7} is only reachable through it
    let database = vec![vec![5, 6, 7], vec![5, 6, 7], vec![5, 6], vec![6]];
    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 0.5, true, strategy).unwrap();
        let map = result.to_map();
        assert_eq!(map.get(&vec![5, 6, 7]), Some(&2), "{strategy}");
        assert_eq!(map.get(&vec![5, 6]), Some(&3), "{strategy}");
        assert_eq!(map.get(&vec![6]), Some(&4), "{strategy}");
        assert_eq!(map.get(&vec![5]), None, "{strategy}");
        assert_eq!(map.len(), 3, "{strategy}");
    }
}

#[test]
fn test_empty_database() {
    for strategy in Strategy::ALL {
        let result = mine(Vec::<Vec<Item>>::new(), 0.4, false, strategy).unwrap();
        assert!(result.is_empty());
        assert!(result.count_by_size().is_empty());
    }
}

#[test]
fn test_no_frequent_items() {
    let database = vec![vec![1], vec![2], vec![3], vec![4]];
    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 0.5, false, strategy).unwrap();
        assert!(result.is_empty(), "{strategy}");
    }
}

#[test]
fn test_ratio_one_keeps_universal_items() {
    let database = vec![vec![1, 2, 3], vec![1, 3, 4], vec![1, 3]];
    let expected: BTreeMap<Vec<Item>, usize> =
        [(vec![1], 3), (vec![3], 3), (vec![1, 3], 3)].into_iter().collect();

    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 1.0, false, strategy).unwrap();
        assert_eq!(result.to_map(), expected, "{strategy}");

        let closed = mine(database.clone(), 1.0, true, strategy).unwrap();
        assert_eq!(closed.to_map().into_iter().collect::<Vec<_>>(), vec![(vec![1, 3], 3)]);
    }
}

#[test]
fn test_invalid_ratio_is_rejected() {
    let err = mine(pasquier_like(), 1.2, false, Strategy::Vertical).unwrap_err();
    assert!(matches!(err, MiningError::InvalidRatio(r) if r == 1.2));

    let store = TransactionStore::build(pasquier_like());
    let config = MiningConfig::new(-0.5);
    assert!(matches!(
        mine_with(&store, &config),
        Err(MiningError::InvalidRatio(_))
    ));
}

#[test]
fn test_vertical_without_columns_fails() {
    let options = StoreOptions {
        build_columns: false,
        ..StoreOptions::default()
    };
    let store = TransactionStore::build_with(pasquier_like(), &options).unwrap();

    for strategy in [Strategy::Vertical, Strategy::Diffset] {
        let config = MiningConfig::new(0.4).with_strategy(strategy);
        assert!(matches!(
            mine_with(&store, &config),
            Err(MiningError::ColumnViewUnavailable)
        ));
    }

    let config = MiningConfig::new(0.4).with_strategy(Strategy::Horizontal);
    assert_eq!(mine_with(&store, &config).unwrap().len(), 6);
}

#[test]
fn test_empty_transactions_lower_relative_support() {
    let database = vec![vec![1, 2], vec![], vec![1], vec![]];
    // minsup = ceil(0.5 * 4) = 2
    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 0.5, false, strategy).unwrap();
        assert_eq!(result.to_map().into_iter().collect::<Vec<_>>(), vec![(vec![1], 2)]);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let database: Vec<Vec<Item>> = (0..60)
        .map(|tid| (0..8).filter(|item| (tid * 7 + item * 3) % (item + 2) != 0).collect())
        .collect();
    let store = TransactionStore::build(database);

    for strategy in Strategy::ALL {
        for closed_only in [false, true] {
            let config = MiningConfig::new(0.2)
                .with_strategy(strategy)
                .with_closed_only(closed_only);
            let sequential = mine_with(&store, &config).unwrap();
            let parallel = mine_with(&store, &config.clone().with_parallel(true)).unwrap();

            assert_eq!(sequential.to_map(), parallel.to_map(), "{strategy}");
            assert_eq!(sequential.len(), parallel.len());
        }
    }
}

#[test]
fn test_single_path_shortcut() {
    // Nested transactions build a single-path tree
    let database = vec![vec![1, 2, 3], vec![1, 2], vec![1]];
    let store = TransactionStore::build(database);
    let config = MiningConfig::new(0.3).with_strategy(Strategy::ProjectedTree);

    let stats = MiningStats::new();
    let result = mine_observed(&store, &config, &stats).unwrap();

    assert_eq!(result.len(), 7);
    assert_eq!(result.support_of(&[1, 2, 3]), Some(1));
    assert_eq!(result.support_of(&[2, 3]), Some(1));
    assert_eq!(result.support_of(&[1, 2]), Some(2));
    // No projection was needed
    assert_eq!(stats.snapshot().projections, 0);
    assert_eq!(stats.snapshot().accepted, 7);
}

#[test]
fn test_observer_counts_closed_rejections() {
    let database = vec![vec![1, 2, 3], vec![1, 2], vec![1, 2, 3], vec![4]];
    let store = TransactionStore::build(database);
    let config = MiningConfig::new(0.5)
        .with_strategy(Strategy::Vertical)
        .with_closed_only(true);

    let stats = MiningStats::new();
    let result = mine_observed(&store, &config, &stats).unwrap();
    let snapshot = stats.snapshot();

    assert_eq!(result.len(), 2);
    assert_eq!(snapshot.accepted, 2);
    // {1}, {2}, {3}, {1,3}, {2,3} are absorbed
    assert_eq!(snapshot.not_closed, 5);
    assert_eq!(snapshot.candidates, 7);
    assert_eq!(snapshot.max_depth, 3);
}

#[test]
fn test_node_list_projections_are_measured() {
    let store = TransactionStore::build(pasquier_like());
    let config = MiningConfig::new(0.4).with_strategy(Strategy::NodeList);

    let stats = MiningStats::new();
    let result = mine_observed(&store, &config, &stats).unwrap();
    let snapshot = stats.snapshot();

    assert_eq!(result.len(), 6);
    assert_eq!(snapshot.projections, 6);
    assert!(snapshot.projected_bytes > 0);
}

#[test]
fn test_diffset_context_tracks_prefix_tids() {
    let store = TransactionStore::build(pasquier_like());
    let root = DiffsetContext::root(&store, 2).unwrap();
    assert_eq!(root.prefix_tids().len(), 5);

    // {1}: t = {0,1,2,3}
    let with_1 = root.project(0, 2);
    assert_eq!(with_1.prefix_tids().as_slice(), &[0, 1, 2, 3]);
    let items: Vec<Item> = with_1.candidates().iter().map(|c| c.item).collect();
    assert_eq!(items, vec![2, 3]);

    // {1,2}: t = t({1}) \ d({1,2}) = {0,1,2}
    let with_12 = with_1.project(0, 2);
    assert_eq!(with_12.prefix_tids().as_slice(), &[0, 1, 2]);
    assert!(with_12.candidates().is_empty());
}

#[test]
fn test_diffset_closed_deep_chain() {
    // {7} only occurs with {1,2,3}; the closure test has to see items
    // ranked before the pivot
    let database = vec![
        vec![1, 2, 3, 7],
        vec![1, 2, 3, 7],
        vec![1, 2, 3],
        vec![1, 2],
        vec![2, 4],
    ];
    let expected: BTreeMap<Vec<Item>, usize> = [
        (vec![2], 5),
        (vec![1, 2], 4),
        (vec![1, 2, 3], 3),
        (vec![1, 2, 3, 7], 2),
    ]
    .into_iter()
    .collect();

    for strategy in Strategy::ALL {
        let result = mine(database.clone(), 0.4, true, strategy).unwrap();
        assert_eq!(result.to_map(), expected, "{strategy}");
    }
}
