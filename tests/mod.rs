//! Main test module for vertree
//!
//! This module includes all test suites:
//! - Integration tests for multi-file sessions and navigation scenarios
//! - Property-based tests for tree and selection invariants

pub mod integration;
pub mod property;

#[cfg(test)]
mod edge_cases {
    use ::vertree::*;

    #[test]
    fn test_empty_text_update() {
        let mut file = FileRecord::new("empty", "Initial version");
        let outcome = file.update("").unwrap();
        assert!(outcome.branched);
        assert_eq!(file.read().unwrap(), "");
        assert_eq!(file.total_versions(), 2);
    }

    #[test]
    fn test_multiline_and_unicode_content() {
        let mut ws = Workspace::new();
        ws.execute_line("CREATE u").unwrap();
        ws.execute_line("UPDATE u héllo wörld ✓").unwrap();
        ws.execute_line("INSERT u  日本語").unwrap();

        let reply = ws.execute_line("READ u").unwrap().unwrap();
        assert_eq!(reply.to_string(), "héllo wörld ✓ 日本語");

        let mut file = FileRecord::new("m", "Initial version");
        file.update("line 1\nline 2\n").unwrap();
        file.insert("line 3").unwrap();
        assert_eq!(file.read().unwrap(), "line 1\nline 2\nline 3");
    }

    #[test]
    fn test_snapshot_with_empty_message() {
        let mut ws = Workspace::new();
        ws.execute_line("CREATE a").unwrap();
        ws.execute_line("UPDATE a x").unwrap();
        ws.execute_line("SNAPSHOT a").unwrap();

        let node = ws.file("a").unwrap().active_version().unwrap();
        assert!(node.is_snapshot());
        assert_eq!(node.snapshot_message(), Some(""));
    }

    #[test]
    fn test_rollback_to_root_by_id() {
        let mut file = FileRecord::new("a", "Initial version");
        file.update("x").unwrap();
        assert_eq!(file.rollback_to(0).unwrap(), 0);
        assert_eq!(file.read().unwrap(), "");
        assert!(matches!(file.rollback(), Err(VersionError::AtRoot)));
    }

    #[test]
    fn test_file_names_are_case_sensitive() {
        let mut ws = Workspace::new();
        ws.execute_line("CREATE Notes").unwrap();
        ws.execute_line("CREATE notes").unwrap();
        assert_eq!(ws.registry().len(), 2);
    }

    #[test]
    fn test_ranking_with_no_files() {
        let ws = Workspace::new();
        assert!(ws.top_files(RankBy::Recency, 5).unwrap().is_empty());
    }
}
