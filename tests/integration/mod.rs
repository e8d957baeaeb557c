//! Integration tests for vertree
//!
//! Drives long randomized sessions over many files and checks them against a
//! simple model of what every file should contain.

use ::vertree::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// Test harness recording every operation applied to a workspace
pub struct SessionHarness {
    pub workspace: Workspace,
    pub rng: StdRng,
    pub operation_log: Vec<String>,
}

impl SessionHarness {
    /// Create a new harness with a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            workspace: Workspace::new(),
            rng: StdRng::seed_from_u64(seed),
            operation_log: Vec::new(),
        }
    }

    /// Execute a line, keeping it in the log
    pub fn run(&mut self, line: &str) -> Result<Option<Reply>> {
        self.operation_log.push(line.to_string());
        self.workspace.execute_line(line)
    }

    /// Output of a line that must succeed
    pub fn output(&mut self, line: &str) -> String {
        match self.run(line) {
            Ok(reply) => reply.map(|r| r.to_string()).unwrap_or_default(),
            Err(e) => panic!("'{}' failed: {}\nlog:\n{}", line, e, self.operation_log.join("\n")),
        }
    }

    /// Apply a random edit, snapshot or rollback to `file`
    pub fn random_step(&mut self, file: &str) {
        let line = match self.rng.random_range(0..5) {
            0 => format!("UPDATE {} text-{}", file, self.rng.random_range(0..1000)),
            1 => format!("INSERT {} +{}", file, self.rng.random_range(0..10)),
            2 => format!("SNAPSHOT {} snap-{}", file, self.rng.random_range(0..1000)),
            3 => format!("ROLLBACK {}", file),
            _ => {
                let total = self.workspace.file(file).unwrap().total_versions() as u64;
                format!("ROLLBACK {} {}", file, self.rng.random_range(0..total))
            }
        };
        match self.run(&line) {
            Ok(_) | Err(VersionError::AtRoot) => {}
            Err(e) => panic!("'{}' failed: {}", line, e),
        }
    }
}

#[test]
fn test_single_file_walkthrough() {
    let mut h = SessionHarness::new(1);

    h.output("CREATE a");
    {
        let tree = h.workspace.file("a").unwrap().tree();
        let root = tree.node(tree.root());
        assert!(root.is_snapshot());
        assert_eq!(root.snapshot_message(), Some("Initial version"));
    }

    h.output("UPDATE a hello");
    assert_eq!(h.workspace.file("a").unwrap().active_id().unwrap(), 1);
    assert_eq!(h.output("READ a"), "hello");

    h.output("SNAPSHOT a v1");
    h.output("INSERT a  world");
    assert_eq!(h.workspace.file("a").unwrap().active_id().unwrap(), 2);
    assert_eq!(h.output("READ a"), "hello world");

    h.output("ROLLBACK a");
    assert_eq!(h.workspace.file("a").unwrap().active_id().unwrap(), 1);
    h.output("ROLLBACK a 2");
    assert_eq!(h.workspace.file("a").unwrap().active_id().unwrap(), 2);

    assert!(matches!(h.run("ROLLBACK a 99"), Err(VersionError::VersionNotFound(99))));
    assert_eq!(h.workspace.file("a").unwrap().active_id().unwrap(), 2);
}

#[test]
fn test_biggest_trees_walkthrough() {
    let mut h = SessionHarness::new(2);
    for name in ["a", "b", "c"] {
        h.output(&format!("CREATE {}", name));
    }
    // b: 5 versions, c: 3 versions
    for i in 0..4 {
        h.output(&format!("UPDATE b v{}", i));
        h.output(&format!("SNAPSHOT b s{}", i));
    }
    for i in 0..2 {
        h.output(&format!("UPDATE c v{}", i));
        h.output(&format!("SNAPSHOT c s{}", i));
    }
    assert_eq!(h.output("BIGGEST_TREES 2"), "b c");
}

#[test]
fn test_randomized_sessions_keep_invariants() {
    let mut h = SessionHarness::new(42);
    let names: Vec<String> = (0..8).map(|i| format!("file{}", i)).collect();
    for name in &names {
        h.output(&format!("CREATE {}", name));
    }

    let mut last_totals: BTreeMap<String, usize> = BTreeMap::new();
    let mut frozen: BTreeMap<(String, VersionId), String> = BTreeMap::new();

    for _ in 0..2000 {
        let name = names[h.rng.random_range(0..names.len())].clone();
        h.random_step(&name);

        let file = h.workspace.file(&name).unwrap();
        let total = file.total_versions();

        // Version count never decreases and ids stay dense
        let previous = last_totals.insert(name.clone(), total).unwrap_or(1);
        assert!(total >= previous);
        assert!(file.tree().find(total as VersionId - 1).is_some());
        assert!(file.tree().find(total as VersionId).is_none());

        // Snapshotted content never changes
        let active = file.active_version().unwrap();
        if active.is_snapshot() {
            let key = (name.clone(), active.id());
            let content = active.content().to_string();
            let seen = frozen.entry(key).or_insert_with(|| content.clone());
            assert_eq!(*seen, content);
        }
    }

    for ((name, id), content) in &frozen {
        let file = h.workspace.file(name).unwrap();
        let node = file.tree().node(file.tree().find(*id).unwrap());
        assert_eq!(node.content(), content);
    }
}

#[test]
fn test_history_after_jump_matches_ancestry() {
    let mut h = SessionHarness::new(7);
    h.output("CREATE doc");
    for _ in 0..300 {
        h.random_step("doc");
    }

    let total = h.workspace.file("doc").unwrap().total_versions() as VersionId;
    for id in 0..total {
        h.output(&format!("ROLLBACK doc {}", id));
        let file = h.workspace.file("doc").unwrap();
        let history: Vec<VersionId> = file.history().unwrap().map(|n| n.id()).collect();

        // Oldest first, starting at the root
        assert_eq!(history.first(), Some(&0));
        assert!(history.windows(2).all(|w| w[0] < w[1]));

        // Ends at the target when it is a snapshot, else at its nearest snapshotted ancestor
        let tree = file.tree();
        let expected_last = tree
            .ancestors(tree.find(id).unwrap())
            .find(|n| n.is_snapshot())
            .map(|n| n.id());
        assert_eq!(history.last().copied(), expected_last);
    }
}
