mod common;

use common::{run_mtgmap, TestEnv};

#[test]
fn doctor_subcommand_is_available() {
    let output = run_mtgmap(&["doctor", "--help"]);

    assert!(
        output.status.success(),
        "doctor --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn doctor_reports_missing_model_and_key() {
    let output = run_mtgmap(&["doctor"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "doctor should run successfully\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("mtgmap doctor"));
    assert!(stdout.contains("model"));
    assert!(stdout.contains("api-key"));
    assert!(
        stdout.contains("missing"),
        "a pristine environment has no model or key\nstdout:\n{}",
        stdout
    );
}

#[test]
fn doctor_json_emits_full_report() {
    let output = run_mtgmap(&["doctor", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "doctor --json should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json should emit valid JSON");
    assert_eq!(report["llm_provider"], "openai");
    assert_eq!(report["whisper_model"], "medium-q8_0");

    let checks = report["checks"]
        .as_array()
        .expect("report should list checks");
    assert!(checks.iter().any(|c| c["name"] == "api-key"));
    assert!(checks.iter().any(|c| c["name"] == "model"));
}

#[test]
fn doctor_sees_configured_api_key() {
    let env = TestEnv::new();
    env.write_config(
        r#"
[llm]
api_key = "sk-test"
"#,
    );

    let output = env.run(&["doctor", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "doctor --json should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json should emit valid JSON");
    let checks = report["checks"]
        .as_array()
        .expect("report should list checks");
    let api_key_check = checks
        .iter()
        .find(|c| c["name"] == "api-key")
        .expect("api-key check should be present");
    assert_eq!(api_key_check["status"], "ok");
}

#[test]
fn doctor_sees_env_credentials() {
    let env = TestEnv::new();

    let output = env.run_with_env(
        &["doctor", "--json"],
        &[
            ("OPENAI_API_KEY", "sk-from-env"),
            ("OPENAI_MODEL", "gpt-4.1-mini"),
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "doctor --json should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(&stdout).expect("doctor --json should emit valid JSON");
    assert_eq!(report["llm_model"], "gpt-4.1-mini");

    let checks = report["checks"]
        .as_array()
        .expect("report should list checks");
    let api_key_check = checks
        .iter()
        .find(|c| c["name"] == "api-key")
        .expect("api-key check should be present");
    assert_eq!(api_key_check["status"], "ok");
}
