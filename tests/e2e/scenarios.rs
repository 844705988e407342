use super::helpers::{TestProject, SYSTEM_PROJECT};
use std::fs;

#[test]
fn test_assemble_writes_report() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "collect_licenses",
        "path = \"share/licenses.json\"\ndependency_scope = \"run\"\n",
    );
    let output_dir = test_env.path("sandbox");

    let output = test_env.run(&[
        "assemble",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
        "--output", output_dir.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report = fs::read_to_string(output_dir.join("share/licenses.json")).unwrap();
    assert!(report.ends_with('\n'));

    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "app": ["MIT"],
            "libc": ["LGPL-2.1-or-later"],
            "zlib": ["Zlib"],
        })
    );
}

#[test]
fn test_assemble_fails_on_blacklist() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "assert_license",
        "path = \"licenses.json\"\ndependency_scope = \"all\"\nblacklist = [\"GPL-3.0\"]\n",
    );
    let output_dir = test_env.path("sandbox");

    let output = test_env.run(&[
        "assemble",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
        "--output", output_dir.to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gcc"));
    assert!(stderr.contains("GPL-3.0-or-later"));
    assert!(stderr.contains("blacklisted"));
    assert!(!output_dir.join("licenses.json").exists());
}

#[test]
fn test_invalid_scope_is_rejected() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "collect_licenses",
        "path = \"licenses.json\"\ndependency_scope = \"runtime\"\n",
    );

    let output = test_env.run(&[
        "assemble",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
        "--output", test_env.path("sandbox").to_str().unwrap(),
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("runtime"));
    assert!(stderr.contains("Acceptable values"));
}

#[test]
fn test_path_outside_sandbox_is_rejected() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "collect_licenses",
        "path = \"../escaped.json\"\ndependency_scope = \"none\"\n",
    );
    let output_dir = test_env.path("sandbox");

    let output = test_env.run(&[
        "assemble",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
        "--output", output_dir.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("'..'"));
    assert!(!test_env.path("escaped.json").exists());
}

#[test]
fn test_check_json_reports_violations_and_warnings() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "assert_license",
        "path = \"licenses.json\"\ndependency_scope = \"build\"\nblacklist = [\"GPL-3.0\"]\n",
    );

    let output = test_env.run(&[
        "check",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
        "--format", "json",
        "--exit-zero",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["licenses"]["gcc"][0], "GPL-3.0-or-later");
    assert_eq!(report["violations"]["total"], 1);
    assert_eq!(report["violations"]["details"][0]["dependency"], "gcc");
    assert_eq!(report["warnings"].as_array().unwrap().len(), 1);
    assert!(report["warnings"][0]["detail"].as_str().unwrap().contains("'GPL-3.0'"));
}

#[test]
fn test_deps_walk_order() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);

    let none = test_env.run(&["deps", "--project", project.to_str().unwrap(), "--target", "licenses"]);
    assert!(none.status.success());
    assert_eq!(String::from_utf8_lossy(&none.stdout), "app\n");

    let all = test_env.run(&[
        "deps", "--project", project.to_str().unwrap(), "--target", "licenses", "--scope", "ALL",
    ]);
    assert!(all.status.success());
    assert_eq!(String::from_utf8_lossy(&all.stdout), "app\nlibc\ngcc\nzlib\n");
}

#[test]
fn test_key_command() {
    let test_env = TestProject::new();
    let element = test_env.write_element(
        "licenses.toml",
        "assert_license",
        "path = \"licenses.json\"\ndependency_scope = \"Run\"\nblacklist = [\"AGPL\"]\n",
    );

    let output = test_env.run(&["key", "--element", element.to_str().unwrap()]);
    assert!(output.status.success());

    let key: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        key,
        serde_json::json!({"scope": "run", "path": "licenses.json", "blacklist": ["AGPL"]})
    );
}

#[test]
fn test_check_exit_codes() {
    let test_env = TestProject::new();
    let project = test_env.write("project.toml", SYSTEM_PROJECT);
    let element = test_env.write_element(
        "licenses.toml",
        "assert_license",
        "path = \"licenses.json\"\ndependency_scope = \"build\"\nblacklist = [\"GPL\"]\n",
    );
    let args = [
        "check",
        "--project", project.to_str().unwrap(),
        "--element", element.to_str().unwrap(),
        "--target", "licenses",
    ];

    let failing = test_env.run(&args);
    assert!(!failing.status.success());
    assert!(String::from_utf8_lossy(&failing.stderr).contains("License violations found"));
    assert!(String::from_utf8_lossy(&failing.stdout).contains("License Summary"));

    let mut lenient = args.to_vec();
    lenient.push("--exit-zero");
    let passing = test_env.run(&lenient);
    assert!(passing.status.success());
}
