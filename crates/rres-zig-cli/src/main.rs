//! Command-line interface for the rres Zig binding generator

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use rres_zig_bindings::{BindgenConfig, BindingGenerator, HeaderLocator};
use rres_zig_core::{BindgenError, BindgenResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rres-zig-bindgen")]
#[command(about = "Generate type-safe Zig bindings from the rres C headers")]
#[command(version)]
#[command(long_about = "Reads rres.h (and rres-raylib.h when present), converts the rres enums into Zig enums and wraps every function that crosses an enum boundary")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (suppress non-error output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Set log level
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Defaults to `generate` with no flags
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the Zig binding module
    Generate(GenerateArgs),
    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to load before printing
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Primary header (skips the package cache search)
    #[arg(long)]
    header: Option<PathBuf>,

    /// Extension header (defaults to rres-raylib.h next to the primary header)
    #[arg(long)]
    extension_header: Option<PathBuf>,

    /// Zig package cache to search for N-V-* packages
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Extra directories to search for rres.h
    #[arg(long)]
    search_dir: Vec<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the bindings to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the generation report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Fail without writing bindings if anything was skipped
    #[arg(long)]
    strict: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = init_logging(&cli).and_then(|_| run(cli));

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        if let BindgenError::HeaderNotFound { searched, .. } = &err {
            for path in searched {
                eprintln!("  searched: {}", path.display());
            }
        }
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> BindgenResult<()> {
    match cli.command {
        Some(Commands::Generate(args)) => handle_generate_command(&args, &mut std::io::stdout().lock()),
        Some(Commands::Config { config }) => handle_config_command(config.as_deref(), &mut std::io::stdout().lock()),
        None => handle_generate_command(&GenerateArgs::default(), &mut std::io::stdout().lock()),
    }
}

fn init_logging(cli: &Cli) -> BindgenResult<()> {
    let log_level = if cli.quiet {
        log::LevelFilter::Error
    } else if cli.verbose {
        log::LevelFilter::Debug
    } else {
        match &cli.log_level {
            Some(LogLevel::Error) => log::LevelFilter::Error,
            Some(LogLevel::Warn) => log::LevelFilter::Warn,
            Some(LogLevel::Info) => log::LevelFilter::Info,
            Some(LogLevel::Debug) => log::LevelFilter::Debug,
            Some(LogLevel::Trace) => log::LevelFilter::Trace,
            None => log::LevelFilter::Info,
        }
    };

    // Logs share the terminal with generated code, so keep them on stderr
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn load_config(path: Option<&Path>) -> BindgenResult<BindgenConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            BindgenConfig::from_file(path)
                .map_err(|e| BindgenError::configuration_in(e.to_string(), path))
        }
        None => Ok(BindgenConfig::default()),
    }
}

fn build_locator(args: &GenerateArgs) -> HeaderLocator {
    let mut locator = HeaderLocator::new();
    if let Some(header) = &args.header {
        locator = locator.with_primary(header);
    }
    if let Some(extension) = &args.extension_header {
        locator = locator.with_extension(extension);
    }
    if let Some(cache_dir) = &args.cache_dir {
        locator = locator.with_cache_dir(cache_dir);
    }
    for dir in &args.search_dir {
        locator.add_search_dir(dir);
    }
    locator
}

fn handle_generate_command<W: Write>(args: &GenerateArgs, stdout: &mut W) -> BindgenResult<()> {
    let config = load_config(args.config.as_deref())?;
    let sources = build_locator(args).locate()?;
    let header_text = sources.read()?;

    let generator = BindingGenerator::with_config(config)?;
    let generated = generator.generate(&header_text)?;
    let report = &generated.report;

    report.log_misses();
    info!("{}", report.summary());

    if let Some(path) = &args.report {
        write_file(path, &report.to_json()?)?;
        info!("Report written to {}", path.display());
    }

    if args.strict && !report.is_clean() {
        return Err(BindgenError::StrictMode {
            skipped: report.skipped_count() + report.unstripped_members.len(),
        });
    }

    match &args.output {
        Some(path) => {
            write_file(path, &generated.source)?;
            info!("Bindings written to {}", path.display());
        }
        None => {
            stdout.write_all(generated.source.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn handle_config_command<W: Write>(config: Option<&Path>, stdout: &mut W) -> BindgenResult<()> {
    let config = load_config(config)?;
    stdout.write_all(config.to_toml()?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> BindgenResult<()> {
    let output_error = |source: std::io::Error| BindgenError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output_error)?;
    }
    fs::write(path, contents).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = r#"
typedef struct rresResourceChunkInfo { unsigned char compType; unsigned char cipherType; } rresResourceChunkInfo;

typedef enum rresCompressionType {
    RRES_COMP_NONE = 0,
    RRES_COMP_DEFLATE = 10,
} rresCompressionType;

RRESAPI rresCompressionType rresNextCompression(rresCompressionType comp);
RRESAPI void rresSetCipherPassword(const char *pass);
"#;

    fn write_header(dir: &Path) -> PathBuf {
        let path = dir.join("rres.h");
        fs::write(&path, HEADER).unwrap();
        path
    }

    fn args_for(header: PathBuf) -> GenerateArgs {
        GenerateArgs {
            header: Some(header),
            ..GenerateArgs::default()
        }
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "rres-zig-bindgen",
            "--verbose",
            "generate",
            "--header",
            "vendor/rres.h",
            "--search-dir",
            "a",
            "--search-dir",
            "b",
            "--output",
            "src/rres.zig",
            "--strict",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.header, Some(PathBuf::from("vendor/rres.h")));
                assert_eq!(args.search_dir, vec![PathBuf::from("a"), PathBuf::from("b")]);
                assert_eq!(args.output, Some(PathBuf::from("src/rres.zig")));
                assert!(args.strict);
                assert!(args.report.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["rres-zig-bindgen", "--log-level", "warn"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["rres-zig-bindgen", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_generate_to_stdout() {
        let dir = TempDir::new().unwrap();
        let args = args_for(write_header(dir.path()));

        let mut stdout = Vec::new();
        handle_generate_command(&args, &mut stdout).unwrap();
        let source = String::from_utf8(stdout).unwrap();

        assert!(source.starts_with("//! Zig bindings for rres"));
        assert!(source.contains("pub fn rresNextCompression(comp: CompressionType) CompressionType {"));
        assert!(source.contains("pub const rresSetCipherPassword = c.rresSetCipherPassword;"));
    }

    #[test]
    fn test_generate_to_file_with_report() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(write_header(dir.path()));
        args.output = Some(dir.path().join("out").join("rres.zig"));
        args.report = Some(dir.path().join("report.json"));

        let mut stdout = Vec::new();
        handle_generate_command(&args, &mut stdout).unwrap();

        assert!(stdout.is_empty());
        let source = fs::read_to_string(dir.path().join("out").join("rres.zig")).unwrap();
        assert!(source.contains("pub const CompressionType = enum(c_uint) {"));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap()).unwrap();
        assert_eq!(report["wrappers"], 1);
        assert_eq!(report["direct_exports"], 1);
        assert_eq!(report["enums_missing"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_strict_mode_writes_no_bindings() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(write_header(dir.path()));
        args.strict = true;
        args.output = Some(dir.path().join("rres.zig"));
        args.report = Some(dir.path().join("report.json"));

        let mut stdout = Vec::new();
        let err = handle_generate_command(&args, &mut stdout).unwrap_err();

        assert!(matches!(err, BindgenError::StrictMode { skipped: 9 }));
        assert_eq!(err.exit_code(), 4);
        assert!(stdout.is_empty());
        assert!(!dir.path().join("rres.zig").exists());
        assert!(dir.path().join("report.json").exists());
    }

    #[test]
    fn test_missing_header_fails_before_output() {
        let dir = TempDir::new().unwrap();
        let args = args_for(dir.path().join("missing.h"));

        let mut stdout = Vec::new();
        let err = handle_generate_command(&args, &mut stdout).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("missing.h"));
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("bindgen.toml");
        fs::write(&config, "enum_names = []\n").unwrap();

        let mut args = args_for(write_header(dir.path()));
        args.config = Some(config.clone());

        let err = handle_generate_command(&args, &mut Vec::new()).unwrap_err();
        match &err {
            BindgenError::Configuration { path, .. } => assert_eq!(path.as_deref(), Some(config.as_path())),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_command_prints_loadable_toml() {
        let mut stdout = Vec::new();
        handle_config_command(None, &mut stdout).unwrap();
        let printed = String::from_utf8(stdout).unwrap();

        assert!(printed.contains("api_marker = \"RRESAPI\""));
        assert_eq!(BindgenConfig::from_str(&printed).unwrap(), BindgenConfig::default());
    }
}
