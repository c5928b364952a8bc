use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use glob::glob;
use lightcode_core::{
    BinaryFormat, CompileFailure, PatternSpec, Stage, Strictness, compile_intent_with,
    decode_format_a, decode_format_b, detect_binary_format, disassemble_legacy, parse_intent,
    spec_to_state, state_to_json, validate_intent_with, validate_spec,
};
use serde::Serialize;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LIGHTCODE_BUILD_COMMIT"),
    " ",
    env!("LIGHTCODE_BUILD_DATE"),
    ")"
);

/// Version byte of the legacy opcode format; it shares the `LCL` magic.
const LEGACY_VERSION: u8 = 0x02;

#[derive(Parser, Debug)]
#[command(name = "lightcode")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Compiler and decoder for LED pattern bytecode (Format A / Format B).",
    long_about = None,
    after_help = "Examples:\n  lightcode compile fire.lcl -o fire.bin\n  lightcode compile state.json --stdout\n  lightcode decode fire.bin --stdout --pretty\n  lightcode convert fire.lcl --leds 60"
)]
struct Cli {
    /// Increase log output (-v debug, -vv trace); LIGHTCODE_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile intent text (Format A) or device state JSON (Format B).
    Compile {
        /// Path to an intent file or a state .json file
        input: PathBuf,

        /// Output path for the bytecode
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write hex bytecode to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Write hex text instead of raw bytes to the output file
        #[arg(long)]
        hex: bool,

        /// Treat unknown semantic values as errors
        #[arg(long)]
        strict: bool,

        /// Suppress warnings and non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Check an intent or state file without writing bytecode.
    Validate {
        input: PathBuf,

        /// Treat unknown semantic values as errors
        #[arg(long)]
        strict: bool,
    },
    /// Decode bytecode back into JSON.
    #[command(alias = "disassemble")]
    Decode {
        /// Path to a bytecode file (raw bytes or hex text)
        input: PathBuf,

        /// Output path for the JSON document
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write JSON to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the format of a bytecode file.
    Detect { input: PathBuf },
    /// Convert a Format A pattern (intent text or bytecode) to device state JSON.
    Convert {
        input: PathBuf,

        /// Number of LEDs the single segment covers
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        leds: u16,

        /// Output path for the state JSON (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            stdout,
            hex,
            strict,
            quiet,
        } => cmd_compile(input, output, stdout, hex, strict, quiet),
        Commands::Validate { input, strict } => cmd_validate(input, strict),
        Commands::Decode {
            input,
            output,
            stdout,
            pretty,
        } => cmd_decode(input, output, stdout, pretty),
        Commands::Detect { input } => cmd_detect(input),
        Commands::Convert {
            input,
            leds,
            output,
            pretty,
        } => cmd_convert(input, leds, output, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().filter_or("LIGHTCODE_LOG", default);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<CompileFailure> for CliError {
    fn from(failure: CompileFailure) -> Self {
        let hint = match failure.stage {
            Stage::Parse => "check the input syntax",
            Stage::Validate => "fix the listed values and retry",
            Stage::Encode => "the pattern cannot be represented in this format",
        };
        CliError::new(failure.to_string(), Some(hint.to_string()))
    }
}

fn cmd_compile(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    as_hex: bool,
    strict: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let text = read_text(&input)?;
    let compiled = match compile_intent_with(&text, strictness(strict)) {
        Ok(compiled) => compiled,
        Err(failure) => {
            print_errors(&failure.errors);
            return Err(failure.into());
        }
    };
    if !quiet {
        for warning in &compiled.warnings {
            eprintln!("warning: {}", warning);
        }
    }

    if stdout {
        println!("{}", hex::encode(&compiled.bytecode));
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    ensure_distinct(&input, &output)?;
    let bytes = if as_hex {
        format!("{}\n", hex::encode(&compiled.bytecode)).into_bytes()
    } else {
        compiled.bytecode.clone()
    };
    write_output(&output, &bytes)?;
    if !quiet {
        eprintln!(
            "OK: {} ({} bytes) -> {}",
            compiled.format,
            compiled.bytecode.len(),
            output.display()
        );
    }
    Ok(())
}

fn cmd_validate(input: PathBuf, strict: bool) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let text = read_text(&input)?;
    let (ok, errors) = validate_intent_with(&text, strictness(strict));
    if ok {
        println!("OK: {} is valid", input.display());
        return Ok(());
    }
    print_errors(&errors);
    Err(CliError::new(
        format!("{} error(s) in {}", errors.len(), input.display()),
        Some("fix the listed values and retry".to_string()),
    ))
}

fn cmd_decode(
    input: PathBuf,
    output: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let bytes = read_bytecode(&input)?;

    let json = match detect_binary_format(&bytes) {
        BinaryFormat::FormatA if bytes.get(3) == Some(&LEGACY_VERSION) => {
            let program = disassemble_legacy(&bytes).context("legacy disassembly failed")?;
            serialize_json(&DecodeReport::new("legacy", program), pretty)?
        }
        BinaryFormat::FormatA => {
            let decoded = decode_format_a(&bytes).context("Format A decoding failed")?;
            serialize_json(&DecodeReport::new(BinaryFormat::FormatA.as_str(), decoded), pretty)?
        }
        BinaryFormat::FormatB => {
            let decoded = decode_format_b(&bytes).context("Format B decoding failed")?;
            serialize_json(&DecodeReport::new(BinaryFormat::FormatB.as_str(), decoded), pretty)?
        }
        BinaryFormat::Unknown => return Err(unknown_format(&input)),
    };

    if stdout {
        println!("{}", json);
        return Ok(());
    }
    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    ensure_distinct(&input, &output)?;
    write_output(&output, json.as_bytes())?;
    eprintln!("OK: decoded -> {}", output.display());
    Ok(())
}

/// JSON envelope written by `decode`.
#[derive(Serialize)]
struct DecodeReport<T> {
    format: &'static str,
    decoded: T,
}

impl<T> DecodeReport<T> {
    fn new(format: &'static str, decoded: T) -> Self {
        Self { format, decoded }
    }
}

fn cmd_detect(input: PathBuf) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let bytes = read_bytecode(&input)?;
    let format = detect_binary_format(&bytes);
    if format == BinaryFormat::FormatA && bytes.get(3) == Some(&LEGACY_VERSION) {
        println!("legacy");
    } else {
        println!("{}", format);
    }
    Ok(())
}

fn cmd_convert(
    input: PathBuf,
    leds: u16,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<(), CliError> {
    let input = resolve_input_path(&input)?;
    let raw = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let spec = load_pattern(&raw)?;

    let state = spec_to_state(&spec, leds).context("conversion failed")?;
    let json = state_to_json(&state, pretty).context("JSON serialization failed")?;
    match output {
        Some(output) => {
            ensure_distinct(&input, &output)?;
            write_output(&output, format!("{}\n", json).as_bytes())?;
            eprintln!("OK: state written -> {}", output.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Reads a Format A pattern from bytecode or intent text.
fn load_pattern(raw: &[u8]) -> Result<PatternSpec, CliError> {
    if detect_binary_format(raw) == BinaryFormat::FormatA {
        let decoded = decode_format_a(raw).context("Format A decoding failed")?;
        for warning in &decoded.warnings {
            log::warn!("{}", warning);
        }
        return Ok(decoded.spec);
    }

    let text = std::str::from_utf8(raw).map_err(|_| {
        CliError::new(
            "input is neither Format A bytecode nor UTF-8 text",
            Some("pass an intent file or a Format A .bin file".to_string()),
        )
    })?;
    let parsed = parse_intent(text).context("intent parsing failed")?;
    for warning in &parsed.warnings {
        eprintln!("warning: {}", warning);
    }
    let (ok, errors) = validate_spec(&parsed.spec);
    if !ok {
        print_errors(&errors);
        return Err(CliError::new(
            "pattern is invalid",
            Some("run `lightcode validate` for details".to_string()),
        ));
    }
    Ok(parsed.spec)
}

fn print_errors(errors: &[String]) {
    for error in errors {
        eprintln!("  - {}", error);
    }
}

fn strictness(strict: bool) -> Strictness {
    if strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    }
}

fn read_text(input: &Path) -> Result<String, CliError> {
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
        .map_err(Into::into)
}

/// Reads bytecode; a file holding only hex digits is decoded first.
fn read_bytecode(input: &Path) -> Result<Vec<u8>, CliError> {
    let raw = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let text = String::from_utf8_lossy(&raw);
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.len() % 2 == 0 && trimmed.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return hex::decode(trimmed)
            .with_context(|| format!("Failed to decode hex input: {}", input.display()))
            .map_err(Into::into);
    }
    Ok(raw)
}

fn unknown_format(input: &Path) -> CliError {
    CliError::new(
        format!("unrecognized bytecode format: {}", input.display()),
        Some("expected a buffer starting with 'LCL' or 'WLED'".to_string()),
    )
}

fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    if fs::canonicalize(output).is_ok_and(|output_abs| output_abs == input_abs) {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, bytes)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        if !input.is_file() {
            return Err(CliError::new(
                format!("input file not found: {}", input.display()),
                Some("check the path or quote a glob pattern".to_string()),
            ));
        }
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
