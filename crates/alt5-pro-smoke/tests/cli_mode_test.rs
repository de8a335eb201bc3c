use std::process::{Command, Output};

const API_KEY_ENV: &[(&str, &str)] = &[
    ("ALT5_PUBLIC_KEY", "f37713f9-9130-4c7d-9490-164808d53741"),
    ("ALT5_PRIVATE_KEY", "139209"),
];

const LOGIN_ENV: &[(&str, &str)] = &[
    ("ALT5_PAY_EMAIL", "trader@example.com"),
    ("ALT5_PAY_PASSWORD", "correct-horse"),
];

fn run_binary_with(env: &[(&str, &str)], args: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_alt5-pro-smoke");

    Command::new(binary_path)
        .args(args)
        .env_clear()
        .envs(env.iter().copied())
        .env("ALT5_BASE_URL", "http://127.0.0.1:9")
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to start alt5-pro-smoke binary")
}

fn run_binary(args: &[&str]) -> Output {
    run_binary_with(API_KEY_ENV, args)
}

#[test]
fn cli_help_lists_subcommands() {
    let output = run_binary(&["--help"]);

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in [
        "run", "profile", "history", "deposit", "place", "cancel-all", "market", "raw",
    ] {
        assert!(stdout.contains(subcommand), "missing {subcommand} in:\n{stdout}");
    }
}

#[test]
fn cli_raw_rejects_unsupported_method() {
    let output = run_binary(&["--log-level", "error", "raw", "--method", "PUT", "/api/profile"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported HTTP method: PUT"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn cli_raw_rejects_unsupported_method_before_login() {
    let output = run_binary_with(
        LOGIN_ENV,
        &["--log-level", "error", "raw", "--method", "PUT", "/api/profile"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported HTTP method: PUT"),
        "unexpected stderr: {stderr}"
    );
    assert!(!stderr.contains("login"), "login attempted: {stderr}");
}

#[test]
fn cli_rejects_invalid_log_level() {
    let output = run_binary(&["--log-level", "app=bogus", "profile"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid log level"), "unexpected stderr: {stderr}");
}
