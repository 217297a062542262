//! Build orchestration tests against a fake `npx` on PATH
//!
//! The fake logs every invocation's arguments and the injected environment,
//! so these tests pin down the exact subprocess contract without Node.js.

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn pagelift_cmd() -> Command {
    Command::cargo_bin("pagelift").unwrap()
}

fn env_log(project: &common::TestProject) -> String {
    std::fs::read_to_string(project.path.join("npx-env.log")).unwrap_or_default()
}

#[test]
fn test_full_build_invokes_framework_build() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("build finished"));

    assert_eq!(project.npx_invocations(), vec!["remix vite:build"]);
}

#[test]
fn test_full_build_injects_memory_ceiling_and_flags() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .arg("build")
        .assert()
        .success();

    let env = env_log(&project);
    assert!(env.contains("NODE_OPTIONS=--max-old-space-size=4096"));
    assert!(env.contains("VITE_OPTIMIZE_MEMORY=1"));
    assert!(env.contains("VITE_REDUCE_BUNDLE=1"));
    assert!(env.contains("VITE_DISABLE_SOURCEMAPS=1"));
    assert!(!env.contains("VITE_SPLIT_BUILD=1"));
}

#[test]
fn test_quiet_build_suppresses_status_output() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["--quiet", "build"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(project.npx_invocations(), vec!["remix vite:build"]);
}

#[test]
fn test_memory_flag_overrides_ceiling() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["build", "--memory", "6144"])
        .assert()
        .success();

    assert!(env_log(&project).contains("NODE_OPTIONS=--max-old-space-size=6144"));
}

#[test]
fn test_sourcemaps_flag_drops_suppression() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["build", "--sourcemaps"])
        .assert()
        .success();

    assert!(!env_log(&project).contains("VITE_DISABLE_SOURCEMAPS=1"));
}

#[test]
fn test_split_build_runs_client_then_server() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["build", "--split"])
        .assert()
        .success();

    assert_eq!(
        project.npx_invocations(),
        vec![
            "vite build --config .pagelift.vite.client.mjs",
            "vite build --config .pagelift.vite.server.mjs",
        ]
    );
    assert!(env_log(&project).contains("VITE_SPLIT_BUILD=1"));

    // Generated configs are cleaned up after the build
    assert!(!project.exists(".pagelift.vite.client.mjs"));
    assert!(!project.exists(".pagelift.vite.server.mjs"));
}

#[test]
fn test_split_build_client_failure_skips_server() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(1);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["build", "--split"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("client build failed"));

    // Server phase never started
    assert_eq!(
        project.npx_invocations(),
        vec!["vite build --config .pagelift.vite.client.mjs"]
    );

    // Final best-effort cleanup still ran
    assert!(!project.exists(".pagelift.vite.client.mjs"));
    assert!(!project.exists(".pagelift.vite.server.mjs"));
}

#[test]
fn test_full_build_failure_propagates_exit_code() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(1);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("framework build failed"));
}

#[test]
fn test_build_cleans_caches_first() {
    let project = common::TestProject::new();
    project.create_dir("node_modules/.cache");
    project.create_dir("dist");
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .arg("build")
        .assert()
        .success();

    assert!(!project.exists("node_modules/.cache"));
    assert!(!project.exists("dist"));
}

#[test]
fn test_keep_caches_skips_cleanup() {
    let project = common::TestProject::new();
    project.create_dir("node_modules/.cache");
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .args(["build", "--keep-caches"])
        .assert()
        .success();

    assert!(project.exists("node_modules/.cache"));
}

#[test]
fn test_deploy_build_flag_builds_missing_output() {
    let project = common::TestProject::new();
    // Fake build that actually produces the client bundle
    let path = project.install_fake_npx_with(
        "mkdir -p build/client && echo '<html></html>' > build/client/index.html\nexit 0",
    );

    let mut server = mockito::Server::new();
    let base = "/accounts/acct/pages/projects/site/deployments";
    let create = server
        .mock("POST", base)
        .with_body(r#"{"success":true,"errors":[],"result":{"id":"dep-1"}}"#)
        .create();
    let upload = server
        .mock("PUT", format!("{base}/dep-1/files/index.html").as_str())
        .with_body(r#"{"success":true,"errors":[],"result":{"id":"index.html"}}"#)
        .create();
    let complete = server
        .mock("POST", format!("{base}/dep-1/complete").as_str())
        .with_body(r#"{"success":true,"errors":[],"result":{"id":"dep-1"}}"#)
        .create();
    let get = server
        .mock("GET", format!("{base}/dep-1").as_str())
        .with_body(
            r#"{"success":true,"errors":[],"result":{"id":"dep-1","url":"https://site.pages.dev"}}"#,
        )
        .create();

    let api_base = server.url();
    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .env("CLOUDFLARE_API_TOKEN", "tok")
        .env("CLOUDFLARE_ACCOUNT_ID", "acct")
        .env_remove("CLOUDFLARE_PROJECT_NAME")
        .args(["deploy", "--project", "site", "--build", "--api-base", api_base.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://site.pages.dev"));

    assert_eq!(project.npx_invocations(), vec!["remix vite:build"]);
    create.assert();
    upload.assert();
    complete.assert();
    get.assert();
}

#[test]
fn test_deploy_build_flag_fails_if_build_produces_nothing() {
    let project = common::TestProject::new();
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .env("CLOUDFLARE_API_TOKEN", "tok")
        .env("CLOUDFLARE_ACCOUNT_ID", "acct")
        .env_remove("CLOUDFLARE_PROJECT_NAME")
        .args(["deploy", "--project", "site", "--build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build output not found"));

    assert_eq!(project.npx_invocations(), vec!["remix vite:build"]);
}

#[test]
fn test_memory_from_config_file() {
    let project = common::TestProject::new();
    project.write_file("pagelift.yaml", "memory: 3072\n");
    let path = project.install_fake_npx(0);

    pagelift_cmd()
        .current_dir(&project.path)
        .env("PATH", &path)
        .arg("build")
        .assert()
        .success();

    assert!(env_log(&project).contains("NODE_OPTIONS=--max-old-space-size=3072"));
}
