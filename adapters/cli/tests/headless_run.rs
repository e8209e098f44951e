use std::{fs, process::Command};

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_polygon-defence"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch polygon-defence binary");

    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

fn fingerprint(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("fingerprint: "))
}

#[test]
fn flag_driven_runs_are_deterministic() {
    let args = ["--seconds", "12", "--tower", "line@240,300"];
    let (first_ok, first, _) = run(&args);
    let (second_ok, second, _) = run(&args);

    assert!(first_ok && second_ok);
    assert!(first.contains("towers:      1"), "summary was:\n{first}");
    assert!(fingerprint(&first).is_some());
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn scenario_file_drives_the_run() {
    let path = std::env::temp_dir().join(format!(
        "polygon-defence-scenario-{}.toml",
        std::process::id()
    ));
    fs::write(
        &path,
        r#"
frames_per_second = 30
seconds = 4.0

[[actions]]
at = 1.0
pause = true
"#,
    )
    .expect("write scenario");

    let (ok, stdout, stderr) = run(&["--scenario", path.to_str().expect("utf-8 path")]);
    let _ = fs::remove_file(&path);

    assert!(ok, "run failed: {stderr}");
    assert!(
        stdout.contains("frames:      120"),
        "summary was:\n{stdout}"
    );
    assert!(
        stdout.contains("phase:       Paused"),
        "summary was:\n{stdout}"
    );
}

#[test]
fn malformed_tower_flag_is_reported() {
    let (ok, _, stderr) = run(&["--tower", "hexagon@1,2"]);

    assert!(!ok);
    assert!(
        stderr.contains("unknown tower kind"),
        "stderr was:\n{stderr}"
    );
}
