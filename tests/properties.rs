use itemset_miner::config::min_count;
use itemset_miner::support::counter_for;
use itemset_miner::{filter_closed_global, mine, mine_with, MiningConfig, Strategy, TransactionStore};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;
use std::collections::BTreeMap;

const NUM_ITEMS: usize = 6;
const WIDE_ITEMS: usize = 10;

fn database() -> impl proptest::strategy::Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(0usize..(1 << NUM_ITEMS), 0..14)
        .prop_map(|masks| masks.into_iter().map(subset).collect())
}

/// Longer rows over more items, for deeper recursion and node-list joins.
fn wide_database() -> impl proptest::strategy::Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(0usize..(1 << WIDE_ITEMS), 20..=40).prop_map(|masks| {
        masks
            .into_iter()
            .map(|mask| subset_of(mask, WIDE_ITEMS))
            .collect()
    })
}

fn ratio() -> impl proptest::strategy::Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.05f64..0.95]
}

fn subset(mask: usize) -> Vec<usize> {
    subset_of(mask, NUM_ITEMS)
}

fn subset_of(mask: usize, num_items: usize) -> Vec<usize> {
    (0..num_items).filter(|&item| mask & (1 << item) != 0).collect()
}

fn support(database: &[Vec<usize>], itemset: &[usize]) -> usize {
    database
        .iter()
        .filter(|row| itemset.iter().all(|item| row.contains(item)))
        .count()
}

/// Every non-empty itemset over the item universe reaching the threshold.
fn brute_force(database: &[Vec<usize>], ratio: f64) -> BTreeMap<Vec<usize>, usize> {
    brute_force_over(database, ratio, NUM_ITEMS)
}

fn brute_force_over(
    database: &[Vec<usize>],
    ratio: f64,
    num_items: usize,
) -> BTreeMap<Vec<usize>, usize> {
    if database.is_empty() {
        return BTreeMap::new();
    }
    let threshold = min_count(ratio, database.len());
    (1..1usize << num_items)
        .map(|mask| subset_of(mask, num_items))
        .map(|itemset| {
            let count = support(database, &itemset);
            (itemset, count)
        })
        .filter(|&(_, count)| count >= threshold)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_strategy_is_complete_and_exact(database in database(), ratio in ratio()) {
        let expected = brute_force(&database, ratio);
        for strategy in Strategy::ALL {
            let result = mine(database.clone(), ratio, false, strategy).unwrap();
            prop_assert_eq!(result.len(), expected.len(), "{} emitted duplicates", strategy);
            prop_assert_eq!(&result.to_map(), &expected, "{}", strategy);
        }
    }

    #[test]
    fn closed_mining_matches_global_filter(database in database(), ratio in ratio()) {
        let store = TransactionStore::build(database);
        let all = mine_with(&store, &MiningConfig::new(ratio)).unwrap();
        let oracle = filter_closed_global(&all).to_map();

        for strategy in Strategy::ALL {
            let config = MiningConfig::new(ratio)
                .with_strategy(strategy)
                .with_closed_only(true);
            let closed = mine_with(&store, &config).unwrap();
            prop_assert_eq!(&closed.to_map(), &oracle, "{}", strategy);
        }
    }

    #[test]
    fn support_is_antimonotone(database in database(), ratio in ratio()) {
        let result = mine(database, ratio, false, Strategy::Diffset).unwrap();
        let map = result.to_map();
        for (itemset, &count) in &map {
            for skip in 0..itemset.len() {
                let mut smaller = itemset.clone();
                smaller.remove(skip);
                if smaller.is_empty() {
                    continue;
                }
                let smaller_count = map.get(&smaller).copied();
                prop_assert!(smaller_count.is_some(), "{:?} missing", smaller);
                prop_assert!(smaller_count.unwrap_or(0) >= count);
            }
        }
    }

    #[test]
    fn counters_agree(database in database(), mask in 0usize..(1 << NUM_ITEMS)) {
        let itemset = subset(mask);
        let expected = support(&database, &itemset);
        let store = TransactionStore::build(database);
        for strategy in Strategy::ALL {
            let counter = counter_for(strategy, &store).unwrap();
            prop_assert_eq!(counter.support(&itemset), expected, "{}", strategy);
        }
    }

    #[test]
    fn parallel_dispatch_is_deterministic(database in database(), ratio in ratio(), closed_only in any::<bool>()) {
        let store = TransactionStore::build(database);
        for strategy in Strategy::ALL {
            let config = MiningConfig::new(ratio)
                .with_strategy(strategy)
                .with_closed_only(closed_only);
            let sequential = mine_with(&store, &config).unwrap();
            let parallel = mine_with(&store, &config.clone().with_parallel(true)).unwrap();
            prop_assert_eq!(sequential.to_map(), parallel.to_map());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn wide_databases_match_brute_force_and_oracle(database in wide_database(), ratio in 0.1f64..0.5) {
        let expected = brute_force_over(&database, ratio, WIDE_ITEMS);
        let store = TransactionStore::build(database);

        let all = mine_with(&store, &MiningConfig::new(ratio)).unwrap();
        prop_assert_eq!(&all.to_map(), &expected);
        let oracle = filter_closed_global(&all).to_map();

        for strategy in Strategy::ALL {
            let config = MiningConfig::new(ratio).with_strategy(strategy);
            let frequent = mine_with(&store, &config).unwrap();
            prop_assert_eq!(frequent.len(), expected.len(), "{} emitted duplicates", strategy);
            prop_assert_eq!(&frequent.to_map(), &expected, "{}", strategy);

            let closed = mine_with(&store, &config.with_closed_only(true)).unwrap();
            prop_assert_eq!(&closed.to_map(), &oracle, "{}", strategy);
        }
    }
}
