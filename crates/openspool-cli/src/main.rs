use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use serde::Serialize;

use openspool_core::{
    Catalog, ColorEntry, DecodeError, EditPolicy, EngineConfig, FileTag, KNOWN_BRANDS,
    MaterialType, NdefError, Outcome, PipelineError, SessionError, SpoolProfile, TemperatureRange,
    ValidationError, Validator, build_json_message, decode_with, encode, read_profile,
    validate_write_preconditions, write_profile,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("OPENSPOOL_BUILD_COMMIT"),
    ", ",
    env!("OPENSPOOL_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "openspool")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Inspect and program OpenSpool filament tags (NDEF dumps and raw JSON payloads).",
    long_about = None,
    after_help = "Examples:\n  openspool tag read spool.ndef --stdout\n  openspool tag write spool.ndef --color blue --material pla --min 190 --max 220\n  openspool check --min 230 --max 220"
)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on tag dumps (raw NDEF messages).
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Decode a bare JSON payload file.
    Decode {
        /// Path to a payload file
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Encode a profile into a payload file.
    Encode {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Output payload path
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Write the payload to stdout
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Wrap the payload in an NDEF message (file output only)
        #[arg(long, conflicts_with = "stdout")]
        ndef: bool,
    },
    /// Check a temperature edit against the configured ladder and policy.
    Check {
        /// Minimum temperature
        #[arg(long)]
        min: i32,

        /// Maximum temperature
        #[arg(long)]
        max: i32,

        /// Which field was just edited
        #[arg(long, value_enum, default_value_t = EditedField::Min)]
        edited: EditedField,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print catalog data.
    Catalog {
        /// Section to print (all sections when omitted)
        #[arg(value_enum)]
        section: Option<CatalogSection>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TagCommands {
    /// Read the spool record of one dump, or of every dump matching a pattern.
    #[command(
        after_help = "Examples:\n  openspool tag read spool.ndef --stdout\n  openspool tag read 'dumps/*.ndef' -o profiles.json --pretty"
    )]
    Read {
        /// Dump path or glob pattern
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Validate, encode, and write a profile to a dump.
    Write {
        /// Dump path (created or replaced)
        dump: PathBuf,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Catalog color (value or label) or six hex digits
    #[arg(long)]
    color: String,

    /// Material: pla, petg, abs, tpu, nylon
    #[arg(long)]
    material: String,

    /// Minimum temperature (material default when omitted)
    #[arg(long)]
    min: Option<i32>,

    /// Maximum temperature (material default when omitted)
    #[arg(long)]
    max: Option<i32>,

    /// Brand (free text)
    #[arg(long)]
    brand: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EditedField {
    Min,
    Max,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogSection {
    Colors,
    Materials,
    Brands,
    Temperatures,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Tag { command } => match command {
            TagCommands::Read { input, output } => cmd_tag_read(&config, input, output),
            TagCommands::Write {
                dump,
                profile,
                quiet,
            } => cmd_tag_write(&config, dump, profile, quiet),
        },
        Commands::Decode { input, output } => cmd_decode(&config, input, output),
        Commands::Encode {
            profile,
            output,
            stdout,
            ndef,
        } => cmd_encode(profile, output, stdout, ndef),
        Commands::Check {
            min,
            max,
            edited,
            pretty,
        } => cmd_check(&config, min, max, edited, pretty),
        Commands::Catalog { section, pretty } => cmd_catalog(&config, section, pretty),
    });

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
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
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

impl From<PipelineError> for CliError {
    fn from(err: PipelineError) -> Self {
        let hint = match &err {
            PipelineError::Session(SessionError::Ndef(ndef)) => ndef_hint(ndef),
            PipelineError::Session(SessionError::Io(_)) => {
                Some("pass a readable tag dump file".to_string())
            }
            PipelineError::Decode(decode) => decode_hint(decode),
            PipelineError::Validation(ValidationError::Blocked { .. }) => Some(
                "use temperatures on the configured ladder, or relax edit_policy in --config"
                    .to_string(),
            ),
            PipelineError::Validation(_) | PipelineError::Encode(_) => {
                Some("min temperature must be strictly below max temperature".to_string())
            }
        };
        CliError::new(err.to_string(), hint)
    }
}

fn ndef_hint(err: &NdefError) -> Option<String> {
    match err {
        NdefError::EmptyMessage => Some("the dump is empty; the tag may be blank".to_string()),
        NdefError::NoJsonRecord => {
            Some("the tag holds no application/json record; it is not an OpenSpool tag".to_string())
        }
        _ => Some("the dump is not a complete NDEF message".to_string()),
    }
}

fn decode_hint(err: &DecodeError) -> Option<String> {
    match err {
        DecodeError::MissingField(_) => {
            Some("OpenSpool records require color_hex, type, min_temp and max_temp".to_string())
        }
        DecodeError::UnknownMaterialType(_) => {
            Some(format!("expected one of: {}", material_list()))
        }
        DecodeError::InvalidTemperatureRange { .. } => Some(
            "set \"inverted_range_on_read\": \"accept\" in --config to inspect this tag"
                .to_string(),
        ),
        _ => None,
    }
}

fn material_list() -> String {
    MaterialType::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    match path {
        None => Ok(EngineConfig::default()),
        Some(path) => EngineConfig::load(path).map_err(|err| {
            CliError::new(
                format!("failed to load config {}: {}", path.display(), err),
                Some(
                    "expected JSON with optional version, temperatures, edit_policy and \
                     inverted_range_on_read"
                        .to_string(),
                ),
            )
        }),
    }
}

fn cmd_tag_read(config: &EngineConfig, input: PathBuf, output: OutputArgs) -> Result<(), CliError> {
    let pattern = input.to_string_lossy().to_string();
    if !is_glob_pattern(&pattern) {
        let mut tag = FileTag::open(&input).map_err(|err| {
            CliError::new(
                format!("cannot open dump {}: {}", input.display(), err),
                Some("pass a tag dump file or a quoted glob pattern".to_string()),
            )
        })?;
        let profile = read_profile(&mut tag, config)?;
        return emit(&profile, &output, &[input.as_path()]);
    }

    let dumps = resolve_pattern(&pattern)?;
    let entries: Vec<ReadEntry> = dumps
        .iter()
        .map(|path| read_entry(config, path))
        .collect();
    let failed = entries.iter().filter(|entry| entry.error.is_some()).count();
    let inputs: Vec<&Path> = dumps.iter().map(PathBuf::as_path).collect();
    emit(&entries, &output, &inputs)?;

    if failed > 0 {
        return Err(CliError::new(
            format!("{} of {} dumps could not be read", failed, entries.len()),
            Some("see the \"error\" field of each entry".to_string()),
        ));
    }
    Ok(())
}

#[derive(Serialize)]
struct ReadEntry {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<SpoolProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn read_entry(config: &EngineConfig, path: &Path) -> ReadEntry {
    let result = FileTag::open(path)
        .map_err(PipelineError::from)
        .and_then(|mut tag| read_profile(&mut tag, config));
    match result {
        Ok(profile) => ReadEntry {
            path: path.display().to_string(),
            profile: Some(profile),
            error: None,
        },
        Err(err) => {
            log::warn!("{}: {}", path.display(), err);
            ReadEntry {
                path: path.display().to_string(),
                profile: None,
                error: Some(err.to_string()),
            }
        }
    }
}

fn cmd_tag_write(
    config: &EngineConfig,
    dump: PathBuf,
    args: ProfileArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let profile = build_profile(&args)?;

    if let Some(parent) = dump.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let mut tag = FileTag::create(&dump);
    let payload = write_profile(&mut tag, &profile, config)?;
    if !quiet {
        eprintln!("OK: {} bytes written -> {}", payload.len(), dump.display());
    }
    Ok(())
}

fn cmd_decode(config: &EngineConfig, input: PathBuf, output: OutputArgs) -> Result<(), CliError> {
    let payload = fs::read(&input)
        .with_context(|| format!("Failed to read payload file: {}", input.display()))?;
    let trimmed = trim_trailing_newline(&payload);
    let profile = decode_with(trimmed, Catalog::builtin(), config.inverted_range_on_read)
        .map_err(PipelineError::from)?;
    emit(&profile, &output, &[input.as_path()])
}

fn cmd_encode(
    args: ProfileArgs,
    output: Option<PathBuf>,
    stdout: bool,
    ndef: bool,
) -> Result<(), CliError> {
    let profile = build_profile(&args)?;
    validate_write_preconditions(&profile).map_err(PipelineError::from)?;
    let payload = encode(&profile).map_err(PipelineError::from)?;

    if stdout {
        println!("{}", String::from_utf8_lossy(&payload));
        return Ok(());
    }

    let output = output.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--output or --stdout".to_string()),
        )
    })?;
    let bytes = if ndef {
        build_json_message(&payload).context("NDEF framing failed")?
    } else {
        payload
    };
    fs::write(&output, bytes)
        .with_context(|| format!("Failed to write payload: {}", output.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct CheckReport {
    policy: EditPolicy,
    range: TemperatureRange,
    outcome: Outcome,
    writable: bool,
}

fn cmd_check(
    config: &EngineConfig,
    min: i32,
    max: i32,
    edited: EditedField,
    pretty: bool,
) -> Result<(), CliError> {
    let validator = Validator::from_config(config);
    let mut range = TemperatureRange::new(min, max);
    let outcome = match edited {
        EditedField::Min => validator.validate_min_temp(min, max),
        EditedField::Max => validator.validate_max_temp(max, min),
    };
    if let Some(corrected) = outcome.corrected_max {
        range.max_c = corrected;
    }
    let blocking = outcome.blocking;
    let report = CheckReport {
        policy: validator.policy(),
        range,
        writable: range.is_ordered() && !blocking,
        outcome,
    };
    println!("{}", to_json(&report, pretty)?);

    if blocking {
        return Err(CliError::new(
            "edit blocked by strict policy",
            Some("pick temperatures on the ladder with min below max".to_string()),
        ));
    }
    if !range.is_ordered() {
        return Err(CliError::new(
            format!(
                "invalid temperature range: min {} must be below max {}",
                range.min_c, range.max_c
            ),
            Some("raise the max temperature before writing".to_string()),
        ));
    }
    Ok(())
}

#[derive(Serialize)]
struct MaterialInfo {
    value: MaterialType,
    label: &'static str,
    default_min_temp: i32,
    default_max_temp: i32,
}

#[derive(Serialize, Default)]
struct CatalogReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<&'static [ColorEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    materials: Option<Vec<MaterialInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brands: Option<&'static [&'static str]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperatures: Option<Vec<i32>>,
}

fn cmd_catalog(
    config: &EngineConfig,
    section: Option<CatalogSection>,
    pretty: bool,
) -> Result<(), CliError> {
    let catalog = Catalog::builtin();
    let wants = |s: CatalogSection| section.is_none_or(|chosen| chosen == s);

    let mut report = CatalogReport::default();
    if wants(CatalogSection::Colors) {
        report.colors = Some(catalog.colors());
    }
    if wants(CatalogSection::Materials) {
        report.materials = Some(
            catalog
                .materials()
                .iter()
                .map(|material| MaterialInfo {
                    value: *material,
                    label: material.label(),
                    default_min_temp: material.default_range().min_c,
                    default_max_temp: material.default_range().max_c,
                })
                .collect(),
        );
    }
    if wants(CatalogSection::Brands) {
        report.brands = Some(&KNOWN_BRANDS);
    }
    if wants(CatalogSection::Temperatures) {
        report.temperatures = Some(config.temperatures.values().collect());
    }
    println!("{}", to_json(&report, pretty)?);
    Ok(())
}

fn build_profile(args: &ProfileArgs) -> Result<SpoolProfile, CliError> {
    let material: MaterialType = args.material.parse().map_err(|err| {
        CliError::new(
            format!("{}", err),
            Some(format!("expected one of: {}", material_list())),
        )
    })?;
    let defaults = material.default_range();
    let range = TemperatureRange::new(
        args.min.unwrap_or(defaults.min_c),
        args.max.unwrap_or(defaults.max_c),
    );

    let catalog = Catalog::builtin();
    let color = args.color.trim();
    let hex = color.strip_prefix('#').unwrap_or(color);
    let mut profile = if let Some(entry) = catalog
        .find_by_value(color)
        .or_else(|| catalog.find_by_label(color))
        .or_else(|| catalog.find_by_hex(hex))
    {
        SpoolProfile::from_color(entry, material, range)
    } else if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        SpoolProfile::from_custom_hex(hex, material, range)
    } else {
        return Err(CliError::new(
            format!("unknown color '{}'", args.color),
            Some("use a catalog color (openspool catalog colors) or six hex digits".to_string()),
        ));
    };

    if let Some(brand) = &args.brand {
        profile = profile.with_brand(brand.clone());
    }
    Ok(profile)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn emit<T: Serialize>(value: &T, output: &OutputArgs, inputs: &[&Path]) -> Result<(), CliError> {
    let json = to_json(value, output.pretty)?;
    if output.stdout {
        println!("{}", json);
        return Ok(());
    }

    let report = output.report.as_ref().ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    ensure_distinct_output(report, inputs)?;
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;
    if !output.quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn ensure_distinct_output(report: &Path, inputs: &[&Path]) -> Result<(), CliError> {
    let Ok(report_abs) = fs::canonicalize(report) else {
        // Output does not exist yet, so it cannot be one of the inputs.
        return Ok(());
    };
    for input in inputs {
        if fs::canonicalize(input).is_ok_and(|input_abs| input_abs == report_abs) {
            return Err(CliError::new(
                format!("report path must differ from input: {}", report.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>, CliError> {
    let paths = glob(pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;

    let mut matches = Vec::new();
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
            format!("no dumps match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

fn trim_trailing_newline(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, b'\n' | b'\r'))
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}
