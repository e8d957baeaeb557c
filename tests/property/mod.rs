//! Property-based testing for vertree
//!
//! Uses proptest to verify invariants and properties across
//! randomly generated inputs and operations.

use ::vertree::select::ranked_order;
use ::vertree::*;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

/// Operation applied to a single file
#[derive(Debug, Clone)]
pub enum FileOp {
    Update(String),
    Insert(String),
    Snapshot(String),
    RollbackParent,
    /// Rollback to `raw % total_versions`
    RollbackTo(u64),
    RollbackMissing(u64),
}

/// Generate a random file operation
fn file_op_strategy() -> impl Strategy<Value = FileOp> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(FileOp::Update),
        "[a-z ]{0,6}".prop_map(FileOp::Insert),
        "[a-z0-9]{0,8}".prop_map(FileOp::Snapshot),
        Just(FileOp::RollbackParent),
        any::<u64>().prop_map(FileOp::RollbackTo),
        (0u64..1000).prop_map(FileOp::RollbackMissing),
    ]
}

/// Apply an operation, returning whether it created a version
fn apply(file: &mut FileRecord, op: &FileOp) -> bool {
    let before = file.total_versions();
    match op {
        FileOp::Update(text) => {
            file.update(text.as_str()).unwrap();
        }
        FileOp::Insert(text) => {
            file.insert(text).unwrap();
        }
        FileOp::Snapshot(message) => {
            file.snapshot(message.as_str()).unwrap();
        }
        FileOp::RollbackParent => {
            let active = file.active_id().unwrap();
            match file.rollback() {
                Ok(_) => {}
                Err(VersionError::AtRoot) => assert_eq!(active, 0),
                Err(e) => panic!("unexpected error {}", e),
            }
        }
        FileOp::RollbackTo(raw) => {
            let id = raw % file.total_versions() as u64;
            assert_eq!(file.rollback_to(id).unwrap(), id);
        }
        FileOp::RollbackMissing(offset) => {
            let active = file.active_id().unwrap();
            let missing = file.total_versions() as u64 + offset;
            assert!(matches!(file.rollback_to(missing), Err(VersionError::VersionNotFound(id)) if id == missing));
            assert_eq!(file.active_id().unwrap(), active);
        }
    }
    file.total_versions() > before
}

/// Generate file summaries with small value ranges so ties are common
fn summaries_strategy() -> impl Strategy<Value = Vec<(i64, usize)>> {
    prop::collection::vec((0i64..20, 1usize..8), 0..60)
}

fn build_summaries<'a>(names: &'a [String], raw: &[(i64, usize)]) -> Vec<FileSummary<'a>> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    raw.iter()
        .zip(names)
        .map(|((minutes, versions), name)| FileSummary {
            name: name.as_str(),
            last_modified: base + Duration::minutes(*minutes),
            total_versions: *versions,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Version count equals nodes created and never decreases
    #[test]
    fn version_count_is_monotonic(ops in prop::collection::vec(file_op_strategy(), 1..80)) {
        let mut file = FileRecord::new("p", "Initial version");
        let mut created = 1usize;
        for op in &ops {
            let before = file.total_versions();
            if apply(&mut file, op) {
                created += 1;
            }
            prop_assert!(file.total_versions() >= before);
            prop_assert_eq!(file.total_versions(), created);
            prop_assert_eq!(file.tree().index().len(), created);
        }
    }

    /// Snapshotted content is never changed by later operations
    #[test]
    fn snapshots_are_immutable(ops in prop::collection::vec(file_op_strategy(), 1..80)) {
        let mut file = FileRecord::new("p", "Initial version");
        let mut frozen: Vec<(VersionId, String, Option<String>)> = vec![(0, String::new(), Some("Initial version".to_string()))];

        for op in &ops {
            apply(&mut file, op);
            let active = file.active_version().unwrap();
            if active.is_snapshot() && !frozen.iter().any(|(id, _, _)| *id == active.id()) {
                frozen.push((
                    active.id(),
                    active.content().to_string(),
                    active.snapshot_message().map(str::to_string),
                ));
            }
            for (id, content, message) in &frozen {
                let node = file.tree().node(file.tree().find(*id).unwrap());
                prop_assert_eq!(node.content(), content.as_str());
                prop_assert_eq!(node.snapshot_message().map(str::to_string), message.clone());
            }
        }
    }

    /// Jumping to a version and listing history yields its snapshotted ancestors, oldest first
    #[test]
    fn rollback_then_history(ops in prop::collection::vec(file_op_strategy(), 1..60), pick in any::<u64>()) {
        let mut file = FileRecord::new("p", "Initial version");
        for op in &ops {
            apply(&mut file, op);
        }
        let id = pick % file.total_versions() as u64;
        file.rollback_to(id).unwrap();

        let history: Vec<VersionId> = file.history().unwrap().map(|n| n.id()).collect();

        let tree = file.tree();
        let mut expected: Vec<VersionId> = tree
            .ancestors(tree.find(id).unwrap())
            .filter(|n| n.is_snapshot())
            .map(|n| n.id())
            .collect();
        expected.reverse();

        prop_assert_eq!(&history, &expected);
        prop_assert_eq!(history.first().copied(), Some(0));
    }

    /// Snapshotting twice leaves the node exactly as after the first call
    #[test]
    fn snapshot_is_idempotent(text in "[a-z]{0,10}", first in "[a-z]{1,6}", second in "[a-z]{1,6}") {
        let mut file = FileRecord::new("p", "Initial version");
        file.update(text.as_str()).unwrap();
        let created = file.snapshot(first.as_str()).unwrap();
        prop_assert_eq!(created, SnapshotOutcome::Created { version: 1 });

        let stamped = file.active_version().unwrap().snapshot_at();
        let again = file.snapshot(second.as_str()).unwrap();
        prop_assert_eq!(again, SnapshotOutcome::AlreadySnapshot { version: 1, message: first.clone() });

        let node = file.active_version().unwrap();
        prop_assert_eq!(node.snapshot_at(), stamped);
        prop_assert_eq!(node.content(), text.as_str());
    }

    /// Bounded selection equals the prefix of a stable sort by the same ranking
    #[test]
    fn selection_matches_stable_sort(raw in summaries_strategy(), k in 1usize..70) {
        let names: Vec<String> = (0..raw.len()).map(|i| format!("f{}", i)).collect();
        let summaries = build_summaries(&names, &raw);

        for by in [RankBy::Recency, RankBy::VersionCount] {
            let mut expected = summaries.clone();
            expected.sort_by(ranked_order::<FileSummary<'_>, _>(by));
            expected.truncate(k);

            let got = select_top_k(summaries.clone(), k, &by).unwrap();
            prop_assert_eq!(got, expected);
        }
    }

    /// Any closure works as a ranking
    #[test]
    fn selection_with_closure_ranking(values in prop::collection::vec(any::<i32>(), 0..100), k in 1usize..120) {
        let smallest_first = |a: &i32, b: &i32| a > b;
        let got = select_top_k(values.clone(), k, &smallest_first).unwrap();

        let mut expected = values.clone();
        expected.sort();
        expected.truncate(k);
        prop_assert_eq!(got, expected);
    }
}
