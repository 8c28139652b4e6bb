use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::tempdir;

fn promptboard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("promptboard").unwrap();
    cmd.args([
        "--file",
        dir.join("board.json").to_str().unwrap(),
        "--credential-file",
        dir.join("credential").to_str().unwrap(),
    ]);
    // Keep ambient configuration out of the test environment.
    cmd.env_remove("PROMPTBOARD_FILE")
        .env_remove("PROMPTBOARD_CREDENTIAL_FILE")
        .env_remove("PROMPTBOARD_API_BASE");
    cmd
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output).expect("Failed to parse JSON output")
}

fn run_ok(dir: &Path, args: &[&str]) -> Value {
    let output = promptboard(dir)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    parse_json_output(&String::from_utf8_lossy(&output))
}

fn create_card(dir: &Path, prompt: &str) -> String {
    let json = run_ok(dir, &["card", "create", "--prompt", prompt]);
    json["data"]["id"].as_str().unwrap().to_string()
}

mod card_tests {
    use super::*;

    #[test]
    fn test_create_uses_dialog_defaults() {
        let dir = tempdir().unwrap();

        let json = run_ok(dir.path(), &["card", "create", "--prompt", "Say hello"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["prompt"], "Say hello");
        assert_eq!(json["data"]["model"], "gpt-4o-mini");
        assert_eq!(json["data"]["config"]["temperature"], 0.7);
        assert_eq!(json["data"]["config"]["maxTokens"], 6000);
        assert!(!json["data"]["id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_out_of_range_config() {
        let dir = tempdir().unwrap();

        promptboard(dir.path())
            .args([
                "card", "create", "--prompt", "x", "--temperature", "2.5",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("temperature"));
    }

    #[test]
    fn test_creates_append_to_todo_in_order() {
        let dir = tempdir().unwrap();
        let first = create_card(dir.path(), "first");
        let second = create_card(dir.path(), "second");

        let json = run_ok(dir.path(), &["card", "list", "--column", "todo"]);
        assert_eq!(json["data"]["count"], 2);
        let items = json["data"]["items"].as_array().unwrap();
        assert_eq!(items[0]["id"], first.as_str());
        assert_eq!(items[1]["id"], second.as_str());
        assert_eq!(items[0]["column"], "todo");
    }

    #[test]
    fn test_list_covers_all_columns_by_default() {
        let dir = tempdir().unwrap();
        let id = create_card(dir.path(), "movable");
        create_card(dir.path(), "stays");

        run_ok(
            dir.path(),
            &["card", "move", "--id", &id, "--column", "done"],
        );

        let json = run_ok(dir.path(), &["card", "list"]);
        assert_eq!(json["data"]["count"], 2);

        let done = run_ok(dir.path(), &["card", "list", "--column", "done"]);
        assert_eq!(done["data"]["count"], 1);
        assert_eq!(done["data"]["items"][0]["id"], id.as_str());
    }

    #[test]
    fn test_move_with_position_reorders() {
        let dir = tempdir().unwrap();
        let a = create_card(dir.path(), "a");
        let b = create_card(dir.path(), "b");
        let c = create_card(dir.path(), "c");

        run_ok(
            dir.path(),
            &[
                "card", "move", "--id", &a, "--column", "todo", "--position", "2",
            ],
        );

        let json = run_ok(dir.path(), &["card", "list", "--column", "todo"]);
        let items = json["data"]["items"].as_array().unwrap();
        let order: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);
    }

    #[test]
    fn test_move_unknown_card_fails() {
        let dir = tempdir().unwrap();
        create_card(dir.path(), "x");

        promptboard(dir.path())
            .args(["card", "move", "--id", "12345", "--column", "done"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }

    #[test]
    fn test_get_round_trips_across_invocations() {
        let dir = tempdir().unwrap();
        let id = create_card(dir.path(), "persisted prompt");

        let json = run_ok(dir.path(), &["card", "get", "--id", &id]);
        assert_eq!(json["data"]["prompt"], "persisted prompt");
        assert!(json["data"].get("result").is_none());
    }
}

mod run_tests {
    use super::*;

    #[test]
    fn test_run_without_credential_rejects_and_keeps_card_queued() {
        let dir = tempdir().unwrap();
        let id = create_card(dir.path(), "Say hello");

        promptboard(dir.path())
            .args(["card", "run", "--id", &id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("credential"));

        let json = run_ok(dir.path(), &["card", "list", "--column", "todo"]);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["id"], id.as_str());
    }

    #[test]
    fn test_failed_dispatch_returns_card_to_todo() {
        let dir = tempdir().unwrap();
        let id = create_card(dir.path(), "Say hello");
        run_ok(
            dir.path(),
            &["credential", "set", "--value", "sk-test-not-real"],
        );

        // An unreachable gateway: the dispatch fails immediately, with no
        // retry, and the card reverts to To Do.
        promptboard(dir.path())
            .args([
                "card",
                "run",
                "--id",
                &id,
                "--api-base",
                "http://127.0.0.1:9/v1",
            ])
            .assert()
            .failure();

        let json = run_ok(dir.path(), &["card", "list", "--column", "todo"]);
        assert_eq!(json["data"]["count"], 1);
        assert!(json["data"]["items"][0].get("result").is_none());

        let inprogress = run_ok(dir.path(), &["card", "list", "--column", "inprogress"]);
        assert_eq!(inprogress["data"]["count"], 0);
    }

    #[test]
    fn test_run_unknown_card_fails() {
        let dir = tempdir().unwrap();
        run_ok(dir.path(), &["credential", "set", "--value", "sk-test"]);

        promptboard(dir.path())
            .args(["card", "run", "--id", "12345"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }
}

mod credential_tests {
    use super::*;

    #[test]
    fn test_set_status_clear_cycle() {
        let dir = tempdir().unwrap();

        let status = run_ok(dir.path(), &["credential", "status"]);
        assert_eq!(status["data"]["configured"], false);

        run_ok(dir.path(), &["credential", "set", "--value", "sk-test"]);
        let status = run_ok(dir.path(), &["credential", "status"]);
        assert_eq!(status["data"]["configured"], true);

        run_ok(dir.path(), &["credential", "clear"]);
        let status = run_ok(dir.path(), &["credential", "status"]);
        assert_eq!(status["data"]["configured"], false);
    }

    #[test]
    fn test_empty_credential_rejected() {
        let dir = tempdir().unwrap();

        promptboard(dir.path())
            .args(["credential", "set", "--value", "  "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must not be empty"));
    }

    #[test]
    fn test_credential_is_stored_separately_from_board() {
        let dir = tempdir().unwrap();
        create_card(dir.path(), "a card");
        run_ok(dir.path(), &["credential", "set", "--value", "sk-test"]);

        let board = std::fs::read_to_string(dir.path().join("board.json")).unwrap();
        assert!(!board.contains("sk-test"));
        let credential = std::fs::read_to_string(dir.path().join("credential")).unwrap();
        assert_eq!(credential, "sk-test");
    }
}

mod export_tests {
    use super::*;

    #[test]
    fn test_export_without_result_fails() {
        let dir = tempdir().unwrap();
        let id = create_card(dir.path(), "not run yet");

        promptboard(dir.path())
            .args(["card", "export", "--id", &id])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no result"));
    }

    #[test]
    fn test_export_writes_result_markdown() {
        let dir = tempdir().unwrap();

        // Seed a completed card directly in the stored snapshot; the file
        // format is the plain three-column array.
        let board = serde_json::json!([
            {"id": "todo", "title": "To Do", "cards": []},
            {"id": "inprogress", "title": "In Progress", "cards": []},
            {"id": "done", "title": "Done", "cards": [{
                "id": "1700000000000",
                "prompt": "Say hello",
                "model": "gpt-4o-mini",
                "result": "# Hello\n\nHi there.",
                "config": {"temperature": 0.7, "maxTokens": 6000}
            }]}
        ]);
        std::fs::write(
            dir.path().join("board.json"),
            serde_json::to_string_pretty(&board).unwrap(),
        )
        .unwrap();

        let out_dir = dir.path().join("exports");
        std::fs::create_dir_all(&out_dir).unwrap();

        let json = run_ok(
            dir.path(),
            &[
                "card",
                "export",
                "--id",
                "1700000000000",
                "--output-dir",
                out_dir.to_str().unwrap(),
            ],
        );
        let path = json["data"]["path"].as_str().unwrap();
        assert!(path.ends_with("prompt_result_1700000000000.md"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "# Hello\n\nHi there.");
    }
}

mod storage_tests {
    use super::*;

    #[test]
    fn test_malformed_board_file_is_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("board.json"), "{definitely not a board").unwrap();

        promptboard(dir.path())
            .args(["card", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Serialization"));
    }

    #[test]
    fn test_wrong_column_shape_is_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("board.json"),
            r#"[{"id": "todo", "title": "To Do", "cards": []}]"#,
        )
        .unwrap();

        promptboard(dir.path())
            .args(["card", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected columns"));
    }

    #[test]
    fn test_stored_snapshot_is_bare_column_array() {
        let dir = tempdir().unwrap();
        create_card(dir.path(), "shape check");

        let raw = std::fs::read_to_string(dir.path().join("board.json")).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        let columns = value.as_array().expect("snapshot is a JSON array");
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0]["id"], "todo");
        assert_eq!(columns[1]["id"], "inprogress");
        assert_eq!(columns[2]["id"], "done");
        assert_eq!(columns[0]["cards"].as_array().unwrap().len(), 1);
    }
}
