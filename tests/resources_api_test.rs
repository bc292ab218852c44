//! Integration tests for the shipped resource templates.

use artifact_harness::resources::{
    placeholders, render_str, Rendered, Substitutions, TemplateRenderer,
};
use std::path::PathBuf;

fn shipped_renderer() -> TemplateRenderer {
    TemplateRenderer::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources"))
}

#[test]
fn npm_package_template_renders_to_json() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new()
        .with("package_name", "example-npm-package")
        .with("package_version", "1.0.1");

    let content = renderer.render("npm_package_template.json", &subs).unwrap();
    let rendered = Rendered::from_template("npm_package_template.json", content).unwrap();

    let json = rendered.as_json().unwrap();
    assert_eq!(json["name"], "example-npm-package");
    assert_eq!(json["version"], "1.0.1");
}

#[test]
fn maven_pom_template_renders_coordinates() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new()
        .with("repo_url", "http://h/artifactory/maven-test")
        .with("group_id", "com.example")
        .with("artifact_id", "example-maven-package")
        .with("version", "1.0.1");

    let pom = renderer.render("maven_pom_template.xml", &subs).unwrap();

    assert!(pom.contains("<groupId>com.example</groupId>"));
    assert!(pom.contains("<artifactId>example-maven-package</artifactId>"));
    assert!(pom.contains("<version>1.0.1</version>"));
    assert!(pom.contains("<url>http://h/artifactory/maven-test</url>"));
    assert!(placeholders(&pom).is_empty());
}

#[test]
fn maven_settings_template_renders_credentials() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new()
        .with("artifactory_username", "admin")
        .with("artifactory_password", "s3cret");

    let settings = renderer
        .render("maven_settings_template.xml", &subs)
        .unwrap();

    assert!(settings.contains("<username>admin</username>"));
    assert!(settings.contains("<password>s3cret</password>"));
}

#[test]
fn npmrc_template_keys_token_by_registry_path() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new()
        .with("registry_url", "http://h/artifactory/api/npm/npm-test/")
        .with("registry_path", "h/artifactory/api/npm/npm-test/")
        .with("auth_token", "tok");

    let npmrc = renderer.render("npmrc_template", &subs).unwrap();

    assert!(npmrc.contains("registry=http://h/artifactory/api/npm/npm-test/"));
    assert!(npmrc.contains("//h/artifactory/api/npm/npm-test/:_authToken=tok"));
}

#[test]
fn partially_rendered_template_keeps_placeholders() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new().with("group_id", "com.example");

    let pom = renderer.render("maven_pom_template.xml", &subs).unwrap();

    assert!(pom.contains("{{artifact_id}}"));
    assert!(pom.contains("{{version}}"));
    assert!(!pom.contains("{{group_id}}"));
}

#[test]
fn render_matches_inline_substitution() {
    let renderer = shipped_renderer();
    let subs = Substitutions::new()
        .with("artifactory_username", "{{artifactory_password}}")
        .with("artifactory_password", "pw");

    let raw = renderer.load("maven_settings_template.xml").unwrap();
    let rendered = renderer
        .render("maven_settings_template.xml", &subs)
        .unwrap();

    assert_eq!(rendered, render_str(&raw, &subs));
    assert!(rendered.contains("<username>{{artifactory_password}}</username>"));
    assert!(rendered.contains("<password>pw</password>"));
}
