//! Scenario flows against a mock repository with stand-in build tools.
#![cfg(unix)]

use artifact_harness::config::ConfigurationStore;
use artifact_harness::fixture::{HarnessOptions, Session, ToolPaths};
use artifact_harness::resources::TemplateRenderer;
use artifact_harness::scenarios::{run_scenario, GenericUpload, MavenDeploy, NpmPublish};
use artifact_harness::HarnessError;
use httpmock::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

const MAVEN_POM_PATH: &str =
    "/artifactory/maven-test/com/example/example-maven-package/1.0.1/example-maven-package-1.0.1.pom";
const NPM_PACKAGE_PATH: &str = "/artifactory/api/npm/npm-test/example-npm-package/";

fn resource_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

fn session(server: &MockServer, work_dir: &Path, tools: ToolPaths) -> Session {
    session_with_java_home(server, work_dir, tools, None)
}

fn session_with_java_home(
    server: &MockServer,
    work_dir: &Path,
    tools: ToolPaths,
    java_home: Option<String>,
) -> Session {
    let config = ConfigurationStore::from_toml_str(&format!(
        "[artifactory]\nserver_url = \"{}/\"\nusername = \"admin\"\npassword = \"password\"\ntoken = \"tok\"\n",
        server.base_url()
    ))
    .unwrap();
    Session::new(
        config,
        TemplateRenderer::new(resource_root()),
        HarnessOptions {
            work_dir: work_dir.to_path_buf(),
            http_timeout: Duration::from_secs(30),
            tool_timeout: Some(Duration::from_secs(30)),
            tools,
            java_home,
        },
    )
}

/// Shell script that records its arguments, cwd and `JAVA_HOME`, and copies
/// listed files out of its working directory before exiting with `code`.
fn stand_in_tool(dir: &Path, name: &str, copies: &[&str], code: i32) -> String {
    let record = dir.join(format!("{name}.record"));
    fs::create_dir_all(&record).unwrap();
    let mut script = format!(
        "#!/bin/sh\necho \"$@\" > '{0}/args'\npwd > '{0}/cwd'\necho \"$JAVA_HOME\" > '{0}/java_home'\n",
        record.display()
    );
    for file in copies {
        script.push_str(&format!("cp {} '{}/' 2>/dev/null\n", file, record.display()));
    }
    script.push_str(&format!("exit {code}\n"));

    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

fn small_upload() -> GenericUpload {
    GenericUpload {
        size_mb: 1,
        ..Default::default()
    }
}

#[test]
fn generic_upload_puts_payload_with_basic_auth() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(PUT)
            .path("/artifactory/generic-test/dummy01.zip")
            .header_exists("authorization");
        then.status(201).body("{}");
    });
    let work = TempDir::new().unwrap();

    let report = run_scenario(&small_upload(), &session(&server, work.path(), ToolPaths::default()));

    upload.assert();
    let outcome = report.result.unwrap();
    assert_eq!(outcome.status, 201);
    assert!(outcome.verified_url.ends_with("/artifactory/generic-test/dummy01.zip"));
    assert!(!work.path().join("generic").exists());
}

#[test]
fn generic_upload_rejected_reports_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/artifactory/generic-test/dummy01.zip");
        then.status(403).body("forbidden by policy");
    });
    let work = TempDir::new().unwrap();

    let report = run_scenario(&small_upload(), &session(&server, work.path(), ToolPaths::default()));

    match report.result {
        Err(HarnessError::VerificationFailure {
            expected,
            status,
            body,
            ..
        }) => {
            assert_eq!(expected, 201);
            assert_eq!(status, 403);
            assert!(body.contains("forbidden by policy"));
        }
        other => panic!("expected verification failure, got {other:?}"),
    }
    assert!(!work.path().join("generic").exists());
}

#[test]
fn maven_deploy_runs_tool_then_verifies_pom() {
    let server = MockServer::start();
    let pom = server.mock(|when, then| {
        when.method(GET).path(MAVEN_POM_PATH);
        then.status(200).body("<project/>");
    });
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let mvn = stand_in_tool(bin.path(), "mvn", &["pom.xml", "../maven_settings.xml"], 0);

    let report = run_scenario(
        &MavenDeploy::default(),
        &session(&server, work.path(), ToolPaths { mvn, ..Default::default() }),
    );

    pom.assert();
    assert_eq!(report.result.unwrap().status, 200);

    let record = bin.path().join("mvn.record");
    let args = fs::read_to_string(record.join("args")).unwrap();
    assert!(args.starts_with("clean deploy --settings="));
    assert!(args.contains("maven_settings.xml -f "));
    assert!(args.trim_end().ends_with("example-maven-package/pom.xml"));

    let cwd = fs::read_to_string(record.join("cwd")).unwrap();
    assert!(cwd.trim_end().ends_with("maven/example-maven-package"));

    let written_pom = fs::read_to_string(record.join("pom.xml")).unwrap();
    assert!(written_pom.contains("<groupId>com.example</groupId>"));
    assert!(written_pom.contains(&format!("{}/artifactory/maven-test", server.base_url())));

    let written_settings = fs::read_to_string(record.join("maven_settings.xml")).unwrap();
    assert!(written_settings.contains("<username>admin</username>"));
    assert!(written_settings.contains("<password>password</password>"));

    assert!(!work.path().join("maven").exists());
}

/// Stand-in `mvn` that fails unless `--settings=` and `-f` name files that
/// exist from its own working directory.
fn path_checking_mvn(dir: &Path) -> String {
    let script = r#"#!/bin/sh
settings=""
pom=""
prev=""
for arg in "$@"; do
    case "$arg" in
        --settings=*) settings="${arg#--settings=}" ;;
    esac
    if [ "$prev" = "-f" ]; then
        pom="$arg"
    fi
    prev="$arg"
done
[ -f "$settings" ] || { echo "settings not found: $settings"; exit 1; }
[ -f "$pom" ] || { echo "pom not found: $pom"; exit 1; }
exit 0
"#;
    let path = dir.join("mvn");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
}

#[test]
fn maven_deploy_with_relative_work_dir() {
    let server = MockServer::start();
    let pom = server.mock(|when, then| {
        when.method(GET).path(MAVEN_POM_PATH);
        then.status(200);
    });
    let work = tempfile::Builder::new()
        .prefix("relative-work")
        .tempdir_in(".")
        .unwrap();
    let relative = PathBuf::from(work.path().file_name().unwrap());
    assert!(relative.is_relative());
    let bin = TempDir::new().unwrap();
    let mvn = path_checking_mvn(bin.path());

    let report = run_scenario(
        &MavenDeploy::default(),
        &session(&server, &relative, ToolPaths { mvn, ..Default::default() }),
    );

    match &report.result {
        Ok(outcome) => assert_eq!(outcome.status, 200),
        Err(e) => panic!("maven scenario failed with relative work dir: {e}"),
    }
    pom.assert();
    assert!(!relative.join("maven").exists());
}

#[test]
fn maven_deploy_passes_java_home_to_tool_only() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(MAVEN_POM_PATH);
        then.status(200);
    });
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let jdk = TempDir::new().unwrap();
    let jdk_path = jdk.path().display().to_string();
    let mvn = stand_in_tool(bin.path(), "mvn", &[], 0);
    let parent_java_home = std::env::var_os("JAVA_HOME");

    let report = run_scenario(
        &MavenDeploy::default(),
        &session_with_java_home(
            &server,
            work.path(),
            ToolPaths { mvn, ..Default::default() },
            Some(jdk_path.clone()),
        ),
    );

    assert!(report.passed(), "{:?}", report.result);
    let recorded = fs::read_to_string(bin.path().join("mvn.record").join("java_home")).unwrap();
    assert_eq!(recorded.trim_end(), jdk_path);
    assert_eq!(std::env::var_os("JAVA_HOME"), parent_java_home);
}

#[test]
fn maven_tool_failure_skips_verification() {
    let server = MockServer::start();
    let pom = server.mock(|when, then| {
        when.method(GET).path(MAVEN_POM_PATH);
        then.status(200);
    });
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let mvn = stand_in_tool(bin.path(), "mvn", &[], 3);

    let report = run_scenario(
        &MavenDeploy::default(),
        &session(&server, work.path(), ToolPaths { mvn, ..Default::default() }),
    );

    match report.result {
        Err(HarnessError::ExternalToolFailure { code, .. }) => assert_eq!(code, Some(3)),
        other => panic!("expected tool failure, got {other:?}"),
    }
    pom.assert_calls(0);
    assert!(!work.path().join("maven").exists());
}

#[test]
fn missing_tool_binary_is_a_tool_failure() {
    let server = MockServer::start();
    let work = TempDir::new().unwrap();

    let report = run_scenario(
        &MavenDeploy::default(),
        &session(
            &server,
            work.path(),
            ToolPaths {
                mvn: "/nonexistent/bin/mvn".to_string(),
                ..Default::default()
            },
        ),
    );

    assert!(matches!(
        report.result,
        Err(HarnessError::ExternalToolFailure { code: None, .. })
    ));
    assert!(!work.path().join("maven").exists());
}

#[test]
fn npm_publish_writes_package_and_npmrc() {
    let server = MockServer::start();
    let package = server.mock(|when, then| {
        when.method(GET).path(NPM_PACKAGE_PATH);
        then.status(200).body("{\"name\":\"example-npm-package\"}");
    });
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let npm = stand_in_tool(bin.path(), "npm", &["package.json", ".npmrc", "index.js"], 0);

    let report = run_scenario(
        &NpmPublish::default(),
        &session(&server, work.path(), ToolPaths { npm, ..Default::default() }),
    );

    package.assert();
    assert_eq!(report.result.unwrap().status, 200);

    let record = bin.path().join("npm.record");
    let registry = format!("{}/artifactory/api/npm/npm-test/", server.base_url());
    let args = fs::read_to_string(record.join("args")).unwrap();
    assert_eq!(args.trim_end(), format!("publish --registry {registry}"));

    let package_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(record.join("package.json")).unwrap()).unwrap();
    assert_eq!(package_json["name"], "example-npm-package");
    assert_eq!(package_json["version"], "1.0.1");
    assert_eq!(package_json["main"], "index.js");

    let npmrc = fs::read_to_string(record.join(".npmrc")).unwrap();
    let registry_path = registry.trim_start_matches("http://");
    assert!(npmrc.contains(&format!("registry={registry}")));
    assert!(npmrc.contains(&format!("//{registry_path}:_authToken=tok")));

    assert!(record.join("index.js").exists());
    assert!(!work.path().join("npm").exists());
}

#[test]
fn npm_package_missing_after_publish_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(NPM_PACKAGE_PATH);
        then.status(404).body("not found");
    });
    let work = TempDir::new().unwrap();
    let bin = TempDir::new().unwrap();
    let npm = stand_in_tool(bin.path(), "npm", &[], 0);

    let report = run_scenario(
        &NpmPublish::default(),
        &session(&server, work.path(), ToolPaths { npm, ..Default::default() }),
    );

    assert!(matches!(
        report.result,
        Err(HarnessError::VerificationFailure {
            expected: 200,
            status: 404,
            ..
        })
    ));
    assert!(!work.path().join("npm").exists());
}

#[test]
fn missing_configuration_fails_before_any_request() {
    let server = MockServer::start();
    let any = server.mock(|_when, then| {
        then.status(201);
    });
    let work = TempDir::new().unwrap();
    let session = Session::new(
        ConfigurationStore::default(),
        TemplateRenderer::new(resource_root()),
        HarnessOptions {
            work_dir: work.path().to_path_buf(),
            ..Default::default()
        },
    );

    let report = run_scenario(&small_upload(), &session);

    match report.result {
        Err(HarnessError::MissingConfigurationValue { section, key }) => {
            assert_eq!(section, "artifactory");
            assert_eq!(key, "server_url");
        }
        other => panic!("expected missing configuration, got {other:?}"),
    }
    any.assert_calls(0);
}
