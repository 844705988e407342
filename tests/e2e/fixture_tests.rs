use super::helpers::TestProject;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize)]
struct CheckOutput {
    licenses: IndexMap<String, Vec<String>>,
}

const DIAMOND_PROJECT: &str = r#"
[[element]]
name = "base"

[element.public.licenses]
license-strings = ["MIT"]

[[element]]
name = "left"
build-depends = ["base"]
runtime-depends = ["base"]

[element.public.licenses]
license-strings = ["Apache-2.0"]

[[element]]
name = "right"
runtime-depends = ["base"]

[element.public.licenses]
license-strings = ["BSD-3-Clause"]

[[element]]
name = "report"
build-depends = ["left", "right", "base"]
"#;

#[test]
fn test_diamond_reports_each_dependency_once() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", DIAMOND_PROJECT);
    let element = test_env.write_element(
        "report.toml",
        "collect_licenses",
        "path = \"licenses.json\"\ndependency_scope = \"all\"\n",
    );

    let output = test_env.run(&[
        "check",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "report",
        "--format", "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("\"base\"").count(), 1);

    let parsed: CheckOutput = serde_json::from_str(&stdout).unwrap();
    let order: Vec<&str> = parsed.licenses.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["left", "base", "right"]);
}

#[test]
fn test_missing_license_data_names_dependency() {
    let test_env = TestProject::new();
    let project = test_env.write(
        "project.toml",
        r#"
[[element]]
name = "unlabelled"

[[element]]
name = "report"
build-depends = ["unlabelled"]
"#,
    );
    let element = test_env.write_element(
        "report.toml",
        "collect_licenses",
        "path = \"licenses.json\"\ndependency_scope = \"none\"\n",
    );

    let output = test_env.run(&[
        "assemble",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "report",
        "--output", test_env.path("sandbox").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unlabelled"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let test_env = TestProject::new();
    let element = test_env.write_element("report.toml", "autotools", "path = \"x\"\n");

    let output = test_env.run(&["key", "--element", element.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("autotools"));
}
