use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use eve2gns_cli::{Args, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Collects all .unl files from a directory
fn collect_unl_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("unl")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, dst_dir: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        dst_dir: dst_dir.to_string_lossy().to_string(),
        config: None,
        console_start_port: None,
        stdout: false,
        log_level: "off".to_string(),
    }
}

fn read_project(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read project file");
    serde_json::from_str(&content).expect("Project file is not JSON")
}

#[test]
fn e2e_smoke_test_valid_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_fixtures = collect_unl_files(fixtures_dir());
    assert!(!valid_fixtures.is_empty(), "No fixtures found in tests/fixtures/");

    let mut failed = Vec::new();

    for fixture in &valid_fixtures {
        if let Err(e) = run(&args(fixture, temp_dir.path())) {
            failed.push((fixture.clone(), e));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid fixtures that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid fixture(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_fixtures = collect_unl_files(fixtures_dir().join("errors"));
    assert!(
        !error_fixtures.is_empty(),
        "No error fixtures found in tests/fixtures/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for fixture in &error_fixtures {
        if run(&args(fixture, temp_dir.path())).is_ok() {
            unexpectedly_succeeded.push(fixture.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError fixtures that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error fixture(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_writes_project_and_configs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = fixtures_dir().join("dmvpn.unl");

    run(&args(&input, temp_dir.path())).expect("Failed to convert dmvpn.unl");

    let project_dir = temp_dir.path().join("dmvpn");
    let project = read_project(&project_dir.join("dmvpn.gns3"));
    assert_eq!(project["name"], "dmvpn");
    assert_eq!(project["topology"]["nodes"].as_array().map(Vec::len), Some(3));
    assert_eq!(project["topology"]["links"].as_array().map(Vec::len), Some(2));
    assert_eq!(project["topology"]["drawings"].as_array().map(Vec::len), Some(1));

    let r1 = fs::read_to_string(project_dir.join("configs").join("R1_startup-config.cfg"))
        .expect("Missing config for R1");
    assert_eq!(r1, "hostname R1\n!\nend\n");
    assert!(
        project_dir
            .join("configs")
            .join("R2_startup-config.cfg")
            .is_file()
    );
}

#[test]
fn e2e_recreates_configs_directory() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let stale = temp_dir
        .path()
        .join("dmvpn")
        .join("configs")
        .join("OLD_startup-config.cfg");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "hostname OLD\n").unwrap();

    run(&args(&fixtures_dir().join("dmvpn.unl"), temp_dir.path()))
        .expect("Failed to convert dmvpn.unl");

    assert!(!stale.exists(), "Stale config should have been removed");
}

#[test]
fn e2e_console_start_port_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut args = args(&fixtures_dir().join("campus.unl"), temp_dir.path());
    args.console_start_port = Some(32768);

    run(&args).expect("Failed to convert campus.unl");

    let project = read_project(&temp_dir.path().join("campus").join("campus.gns3"));
    assert_eq!(project["scene_width"], 3000);
    assert_eq!(project["scene_height"], 1500);

    let consoles: Vec<u64> = project["topology"]["nodes"]
        .as_array()
        .expect("nodes should be an array")
        .iter()
        .filter_map(|node| node["console"].as_u64())
        .collect();
    assert_eq!(consoles, vec![32768, 32769, 32770, 32771]);
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("eve2gns.toml");
    fs::write(&config_path, "[console]\nstart_port = 6000\n").unwrap();

    let mut args = args(&fixtures_dir().join("dmvpn.unl"), temp_dir.path());
    args.config = Some(config_path.to_string_lossy().to_string());
    run(&args).expect("Failed to convert dmvpn.unl");

    let project = read_project(&temp_dir.path().join("dmvpn").join("dmvpn.gns3"));
    assert_eq!(project["topology"]["nodes"][0]["console"], 6000);
}

#[test]
fn e2e_empty_lab() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    run(&args(&fixtures_dir().join("empty.unl"), temp_dir.path()))
        .expect("Failed to convert empty.unl");

    let project_dir = temp_dir.path().join("empty");
    let project = read_project(&project_dir.join("empty.gns3"));
    assert_eq!(project["scene_width"], 2000);
    assert_eq!(project["scene_height"], 1000);
    assert_eq!(project["topology"]["nodes"].as_array().map(Vec::len), Some(0));
    assert!(project_dir.join("configs").is_dir());
}

#[test]
fn e2e_role_less_node_is_exported() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    run(&args(&fixtures_dir().join("services.unl"), temp_dir.path()))
        .expect("Failed to convert services.unl");

    let project = read_project(&temp_dir.path().join("services").join("services.gns3"));
    let server = &project["topology"]["nodes"][1];
    assert_eq!(server["name"], "SRV");
    assert_eq!(server["node_type"], "qemu");
    assert_eq!(server["symbol"], ":/symbols/computer.svg");
    assert_eq!(server["label"]["x"], 0);
    assert_eq!(server["label"]["y"], -25);
}

#[test]
fn e2e_node_name_cannot_leave_configs_directory() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let dst_dir = temp_dir.path().join("out");

    let result = run(&args(
        &fixtures_dir().join("errors").join("unsafe_node_name.unl"),
        &dst_dir,
    ));

    assert!(result.is_err());
    assert!(!temp_dir.path().join("escaped_startup-config.cfg").exists());
    assert!(!dst_dir.join("unsafe-node-name").exists());
}

#[test]
fn e2e_lab_name_cannot_leave_destination() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let dst_dir = temp_dir.path().join("out");

    let result = run(&args(
        &fixtures_dir().join("errors").join("unsafe_lab_name.unl"),
        &dst_dir,
    ));

    assert!(result.is_err());
    assert!(!temp_dir.path().join("outside").exists());
}

#[test]
fn e2e_shared_config_name_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let err = run(&args(
        &fixtures_dir().join("errors").join("duplicate_config_name.unl"),
        temp_dir.path(),
    ))
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "nodes `1` and `2` both have a startup config and share the name `R1`"
    );
    assert!(!temp_dir.path().join("duplicate-config-name").exists());
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let result = run(&args(
        &fixtures_dir().join("does_not_exist.unl"),
        temp_dir.path(),
    ));
    assert!(result.is_err());
}
