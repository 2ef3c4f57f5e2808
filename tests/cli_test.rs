//! End-to-end tests of the forestgen binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

use forestgen::config::Settings;
use forestgen::domain::OwnershipFormat;

/// Run the binary with an isolated config home and no FORESTGEN_* leakage.
fn run(args: &[&str], envs: &[(&str, &str)], config_home: &TempDir) -> Output {
    let exe = env!("CARGO_BIN_EXE_forestgen");
    let mut cmd = Command::new(exe);
    cmd.args(args);
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    cmd.env_remove("FORESTGEN_SEED");
    cmd.env_remove("FORESTGEN_PREFIX");
    cmd.env_remove("FORESTGEN_FORMAT");
    cmd.env("NO_COLOR", "1");
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output().expect("run forestgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn given_small_forest_when_running_then_prints_summary_and_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forest.csv");

    let output = run(
        &["--trees", "1", "--depth", "2", "--degree", "2", path.to_str().unwrap()],
        &[],
        &dir,
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout(&output).trim_end(),
        "Generated 1 tree(s) with depth 2 and node degree 2, 2 edges in total."
    );
    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "parent, child, ownership");
    assert!(lines[1].starts_with("C0,C1,"));
    assert!(lines[2].starts_with("C0,C2,"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn given_defaults_when_running_twice_then_files_are_identical() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");

    let first = run(&[a.to_str().unwrap()], &[], &dir);
    let second = run(&[b.to_str().unwrap()], &[], &dir);

    assert!(first.status.success() && second.status.success());
    assert_eq!(
        stdout(&first).trim_end(),
        "Generated 1 tree(s) with depth 10 and node degree 3, 29523 edges in total."
    );
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
}

#[test]
fn given_zero_depth_when_running_then_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forest.csv");

    let output = run(&["--trees", "5", "--depth", "0", path.to_str().unwrap()], &[], &dir);

    assert!(output.status.success());
    assert!(stdout(&output).contains(", 0 edges in total."));
    assert_eq!(fs::read_to_string(&path).unwrap(), "parent, child, ownership\n");
}

#[test]
fn given_unwritable_path_when_running_then_exits_with_ioerr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("forest.csv");

    let output = run(&[path.to_str().unwrap()], &[], &dir);

    assert_eq!(output.status.code(), Some(forestgen::exitcode::IOERR));
    assert!(String::from_utf8_lossy(&output.stderr).contains("create output"));
}

#[test]
fn given_non_integer_trees_when_running_then_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--trees", "many", "out.csv"], &[], &dir);
    assert!(!output.status.success());
}

#[test]
fn given_env_and_flags_when_show_config_then_flags_override_env() {
    let dir = TempDir::new().unwrap();

    let env_only = run(
        &["--show-config"],
        &[("FORESTGEN_SEED", "17"), ("FORESTGEN_FORMAT", "shortest")],
        &dir,
    );
    assert!(
        env_only.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&env_only.stderr)
    );
    let settings: Settings = toml::from_str(&stdout(&env_only)).unwrap();
    assert_eq!(settings.seed, 17);
    assert_eq!(settings.format, OwnershipFormat::Shortest);

    let with_flag = run(
        &["--show-config", "--seed", "3"],
        &[("FORESTGEN_SEED", "17")],
        &dir,
    );
    let settings: Settings = toml::from_str(&stdout(&with_flag)).unwrap();
    assert_eq!(settings.seed, 3);
}

#[test]
fn given_global_config_when_show_config_then_applies_it() {
    let dir = TempDir::new().unwrap();
    let global_dir = dir.path().join("forestgen");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(global_dir.join("forestgen.toml"), "prefix = \"N\"\nseed = 8\n").unwrap();

    let output = run(&["--show-config"], &[], &dir);

    let settings: Settings = toml::from_str(&stdout(&output)).unwrap();
    assert_eq!(settings.prefix, 'N');
    assert_eq!(settings.seed, 8);
}

#[test]
fn given_init_config_when_running_then_global_template_is_written_once() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("forestgen").join("forestgen.toml");

    let first = run(&["--init-config"], &[], &dir);

    assert!(first.status.success());
    assert!(stdout(&first).contains("forestgen.toml"));
    assert_eq!(fs::read_to_string(&global).unwrap(), Settings::template());

    let shown = run(&["--show-config"], &[], &dir);
    let settings: Settings = toml::from_str(&stdout(&shown)).unwrap();
    assert_eq!(settings, Settings::default());

    let second = run(&["--init-config"], &[], &dir);
    assert_eq!(second.status.code(), Some(forestgen::exitcode::CONFIG));
}

#[test]
fn given_bad_env_prefix_when_running_then_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--show-config"], &[("FORESTGEN_PREFIX", "AB")], &dir);
    assert_eq!(output.status.code(), Some(forestgen::exitcode::CONFIG));
}

#[test]
fn given_completions_flag_when_running_then_prints_script() {
    let dir = TempDir::new().unwrap();
    let output = run(&["--completions", "bash"], &[], &dir);
    assert!(output.status.success());
    assert!(stdout(&output).contains("forestgen"));
}
