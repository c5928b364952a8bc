use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lightcode_core::{compile_intent, compile_state_json, encode_legacy, parse_intent};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let output = path.join("expected.hex");
        let intent = path.join("input.lcl");
        let state = path.join("input.json");
        let legacy = path.join("legacy.lcl");
        if intent.exists() {
            regenerate_one(&intent, &output, false)?;
        } else if state.exists() {
            regenerate_one(&state, &output, true)?;
        } else if legacy.exists() {
            regenerate_legacy(&legacy, &output)?;
        }
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path, state: bool) -> Result<(), String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let compiled = if state {
        compile_state_json(&text)
    } else {
        compile_intent(&text)
    }
    .map_err(|err| format!("compile failed for {}: {}", input.display(), err))?;
    let hex = format!("{}\n", hex::encode(&compiled.bytecode));
    fs::write(output, hex).map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

fn regenerate_legacy(input: &Path, output: &Path) -> Result<(), String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let parsed = parse_intent(&text)
        .map_err(|err| format!("parse failed for {}: {}", input.display(), err))?;
    let bytes = encode_legacy(&parsed.spec)
        .map_err(|err| format!("encode failed for {}: {}", input.display(), err))?;
    let hex = format!("{}\n", hex::encode(bytes));
    fs::write(output, hex).map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
