use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lightcode"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden(case: &str, file: &str) -> std::path::PathBuf {
    repo_root().join("tests").join("golden").join(case).join(file)
}

fn expected_hex(case: &str) -> String {
    std::fs::read_to_string(golden(case, "expected.hex"))
        .expect("read expected.hex")
        .trim()
        .to_string()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("compile").and(contains("decode")).and(contains("convert")));
    cmd().arg("decode").arg("--help").assert().success();
    cmd().arg("disassemble").arg("--help").assert().success();
}

#[test]
fn compile_stdout_matches_golden() {
    cmd()
        .arg("compile")
        .arg(golden("fire_red", "input.lcl"))
        .arg("--stdout")
        .assert()
        .success()
        .stdout(contains(expected_hex("fire_red")));
}

#[test]
fn compile_state_json_writes_raw_bytes() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("out").join("state.bin");

    cmd()
        .arg("compile")
        .arg(golden("state_two_segments", "input.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK: format_b"));

    let bytes = std::fs::read(&output).expect("read output");
    assert_eq!(hex::encode(bytes), expected_hex("state_two_segments"));
}

#[test]
fn compile_hex_flag_writes_text() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("fire.hex");

    cmd()
        .arg("compile")
        .arg(golden("candle_tall", "input.lcl"))
        .arg("-o")
        .arg(&output)
        .arg("--hex")
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());

    let text = std::fs::read_to_string(&output).expect("read output");
    assert_eq!(text.trim(), expected_hex("candle_tall"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.lcl");

    cmd()
        .arg("compile")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("compile")
        .arg(golden("fire_red", "input.lcl"))
        .arg("--stdout")
        .arg("-o")
        .arg(temp.path().join("out.bin"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn unknown_value_warns_then_fails_in_strict_mode() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("fire.lcl");
    std::fs::write(&input, "effect: fire\nbehavior:\n  flame_height: enormous\n").unwrap();

    cmd()
        .arg("compile")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("warning: line 3: unknown flame_height 'enormous'"));

    cmd()
        .arg("compile")
        .arg(&input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .code(2)
        .stderr(contains("validate failed").and(contains("enormous")));
}

#[test]
fn validate_lists_every_error() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("bad.json");
    std::fs::write(
        &input,
        r#"{"on":true,"bri":300,"seg":[{"start":5,"stop":5,"col":[[256,0,0]]}]}"#,
    )
    .unwrap();

    cmd()
        .arg("validate")
        .arg(&input)
        .assert()
        .failure()
        .code(2)
        .stderr(
            contains("brightness 300 out of range")
                .and(contains("stop 5 must be greater than start 5"))
                .and(contains("value 256 out of range"))
                .and(contains("3 error(s)")),
        );

    cmd()
        .arg("validate")
        .arg(golden("pulse_calm", "input.lcl"))
        .assert()
        .success()
        .stdout(contains("is valid"));
}

#[test]
fn compile_lists_validation_errors_before_failing() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("bad.json");
    std::fs::write(
        &input,
        r#"{"on":true,"seg":[{"id":300,"stop":5,"sx":999,"col":[[1,2,3]]}]}"#,
    )
    .unwrap();

    let assert = cmd()
        .arg("compile")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .failure()
        .code(2)
        .stderr(
            contains("  - segment[0]: id 300 out of range (0-255)")
                .and(contains("  - segment[0]: speed 999 out of range (0-255)"))
                .and(contains("error: validate failed")),
        );
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 stderr");
    let listed = stderr.find("  - segment[0]: id").expect("listed error");
    let summary = stderr.find("error: validate failed").expect("summary");
    assert!(listed < summary, "{stderr}");
}

#[test]
fn compile_warns_about_short_segment_palette() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("fire.json");
    std::fs::write(&input, r#"{"on":true,"seg":[{"stop":30,"fx":49,"col":[[255,0,0]]}]}"#)
        .unwrap();

    cmd()
        .arg("compile")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains(
            "warning: segment[0]: Fire 2012 expects at least 3 colors, got 1",
        ));
}

#[test]
fn decode_format_a_hex_file() {
    let assert = cmd()
        .arg("decode")
        .arg(golden("sparkle_reverse", "expected.hex"))
        .arg("--stdout")
        .assert()
        .success();
    let json = stdout_json(&assert);
    assert_eq!(json["format"], "format_a");
    assert_eq!(json["decoded"]["spec"]["effect"], "sparkle");
    assert_eq!(json["decoded"]["spec"]["density"], 200);
}

#[test]
fn decode_format_b_to_file() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("state.json");

    cmd()
        .arg("decode")
        .arg(golden("single_white", "expected.hex"))
        .arg("-o")
        .arg(&output)
        .arg("--pretty")
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).expect("read output");
    let json: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(json["format"], "format_b");
    assert_eq!(json["decoded"]["state"]["bri"], 200);
    assert_eq!(json["decoded"]["state"]["seg"][0]["stop"], 8);
}

#[test]
fn detect_prints_format() {
    cmd()
        .arg("detect")
        .arg(golden("state_two_segments", "expected.hex"))
        .assert()
        .success()
        .stdout(contains("format_b"));

    let temp = TempDir::new().expect("tempdir");
    let junk = temp.path().join("junk.bin");
    std::fs::write(&junk, [0x00, 0x01, 0x02]).unwrap();
    cmd()
        .arg("detect")
        .arg(&junk)
        .assert()
        .success()
        .stdout(contains("unknown"));
}

#[test]
fn decode_rejects_unknown_format() {
    let temp = TempDir::new().expect("tempdir");
    let junk = temp.path().join("junk.bin");
    std::fs::write(&junk, b"NOPE1234").unwrap();

    cmd()
        .arg("decode")
        .arg(&junk)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("unrecognized bytecode format"));
}

#[test]
fn convert_intent_to_state() {
    let assert = cmd()
        .arg("convert")
        .arg(golden("fire_red", "input.lcl"))
        .arg("--leds")
        .arg("60")
        .assert()
        .success();
    let json = stdout_json(&assert);
    let segment = &json["seg"][0];
    assert_eq!(segment["fx"], 49);
    assert_eq!(segment["stop"], 60);
    assert_eq!(segment["col"][0], serde_json::json!([255, 0, 0]));
}

#[test]
fn convert_rejects_zero_leds() {
    cmd()
        .arg("convert")
        .arg(golden("fire_red", "input.lcl"))
        .arg("--leds")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn glob_input_must_match_one_file() {
    let temp = TempDir::new().expect("tempdir");
    std::fs::write(temp.path().join("a.lcl"), "effect: solid\n").unwrap();

    let single = temp.path().join("*.lcl");
    cmd()
        .arg("compile")
        .arg(&single)
        .arg("--stdout")
        .assert()
        .success();

    std::fs::write(temp.path().join("b.lcl"), "effect: rainbow\n").unwrap();
    cmd()
        .arg("compile")
        .arg(&single)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}

#[test]
fn legacy_buffers_are_detected_and_disassembled() {
    let spec = lightcode_core::PatternSpec {
        effect: "rainbow".to_string(),
        ..lightcode_core::PatternSpec::default()
    };
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("legacy.bin");
    std::fs::write(&input, lightcode_core::encode_legacy(&spec).expect("encode")).unwrap();

    cmd()
        .arg("detect")
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("legacy"));

    let assert = cmd()
        .arg("disassemble")
        .arg(&input)
        .arg("--stdout")
        .assert()
        .success();
    let json = stdout_json(&assert);
    assert_eq!(json["format"], "legacy");
    let instructions = json["decoded"]["instructions"].as_array().expect("instructions");
    assert_eq!(instructions[0]["opcode"], "SET_PATTERN");
    assert_eq!(instructions.last().unwrap()["opcode"], "HALT");
}
