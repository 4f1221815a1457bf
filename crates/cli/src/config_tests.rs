use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

const CHECK_SUITE_EVENT: &str = r#"{
    "action": "completed",
    "check_suite": {
        "id": 5128,
        "head_branch": "feature/login",
        "head_sha": "abc123",
        "status": "completed",
        "conclusion": "failure",
        "app": { "slug": "github-actions" }
    },
    "repository": {
        "id": 1296269,
        "name": "hello-world",
        "full_name": "octocat/hello-world",
        "owner": { "login": "octocat", "id": 1 }
    }
}"#;

const WORKFLOW_RUN_EVENT: &str = r#"{
    "action": "completed",
    "workflow_run": {
        "id": 30433642,
        "name": "CI",
        "head_branch": null,
        "head_sha": "def456",
        "check_suite_id": 42
    },
    "repository": {
        "name": "hello-world",
        "owner": { "login": "octocat" }
    }
}"#;

fn write_event(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_load_check_suite_event() {
    let file = write_event(CHECK_SUITE_EVENT);

    let event = EventPayload::load(file.path()).unwrap();
    let inputs = ContextInputs::from_event(&event);

    assert_eq!(
        inputs,
        ContextInputs {
            owner: Some("octocat".to_string()),
            repo: Some("hello-world".to_string()),
            head_branch: Some("feature/login".to_string()),
            head_commit: Some("abc123".to_string()),
            workflow: None,
            check_suite_id: Some(5128),
        }
    );
}

#[test]
fn test_load_workflow_run_event() {
    let file = write_event(WORKFLOW_RUN_EVENT);

    let event = EventPayload::load(file.path()).unwrap();
    let inputs = ContextInputs::from_event(&event);

    assert_eq!(inputs.workflow, Some("CI".to_string()));
    assert_eq!(inputs.head_branch, None);
    assert_eq!(inputs.head_commit, Some("def456".to_string()));
    assert_eq!(inputs.check_suite_id, Some(42));
}

#[test]
fn test_load_missing_event_file() {
    let dir = tempfile::tempdir().unwrap();

    let result = EventPayload::load(&dir.path().join("event.json"));

    assert!(matches!(result, Err(CliError::ConfigError(_))));
}

#[test]
fn test_load_malformed_event_file() {
    let file = write_event("{ not json");

    let result = EventPayload::load(file.path());

    assert!(matches!(result, Err(CliError::ConfigError(_))));
}

#[test]
fn test_from_repository() {
    let inputs = ContextInputs::from_repository("octocat/hello-world").unwrap();

    assert_eq!(inputs.owner, Some("octocat".to_string()));
    assert_eq!(inputs.repo, Some("hello-world".to_string()));
}

#[test]
fn test_from_repository_invalid() {
    for value in ["octocat", "/hello-world", "octocat/", "a/b/c"] {
        assert!(
            matches!(
                ContextInputs::from_repository(value),
                Err(CliError::InvalidArguments(_))
            ),
            "'{}' should be rejected",
            value
        );
    }
}

#[test]
fn test_merge_overrides_win() {
    let base = ContextInputs {
        owner: Some("octocat".to_string()),
        head_branch: Some("main".to_string()),
        workflow: Some("CI".to_string()),
        ..ContextInputs::default()
    };
    let overrides = ContextInputs {
        head_branch: Some("feature".to_string()),
        check_suite_id: Some(7),
        ..ContextInputs::default()
    };

    let merged = base.merge(overrides);

    assert_eq!(merged.owner, Some("octocat".to_string()));
    assert_eq!(merged.head_branch, Some("feature".to_string()));
    assert_eq!(merged.workflow, Some("CI".to_string()));
    assert_eq!(merged.check_suite_id, Some(7));
}

#[test]
fn test_into_context_without_branch() {
    let inputs = ContextInputs {
        owner: Some("octocat".to_string()),
        repo: Some("hello-world".to_string()),
        head_branch: None,
        head_commit: Some("abc123".to_string()),
        workflow: Some("build".to_string()),
        check_suite_id: Some(1),
    };

    let context = inputs.into_context().unwrap();

    assert_eq!(context.head_branch(), None);
    assert_eq!(context.workflow(), "build");
    assert_eq!(context.check_suite_id(), 1);
}

#[test]
fn test_into_context_missing_workflow() {
    let file = write_event(CHECK_SUITE_EVENT);
    let event = EventPayload::load(file.path()).unwrap();

    let result = ContextInputs::from_event(&event).into_context();

    match result {
        Err(CliError::InvalidArguments(message)) => assert!(message.contains("workflow")),
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn test_get_config_path_explicit() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}
