mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formatter::Formatter;
use metrum::{display_units, Engine, InlineRenderer, MessageCatalog, UnitSystem};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const UNIT_SYSTEM_SUFFIX: &str = ".units.json";

#[derive(Parser)]
#[command(name = "metrum")]
#[command(about = "Dimensional analysis for unit expressions.")]
#[command(
    long_about = "Metrum reads unit expressions such as 'kg m / s^2', resolves them through a unit system and prints their canonical dimensions.\nThe CLI parses and compares expressions, inspects unit systems, or serves the same over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    units: UnitOptions,
    #[command(subcommand)]
    command: Commands,
}

/// Where the unit system and messages come from
#[derive(Args)]
struct UnitOptions {
    /// JSON unit system file to load (repeatable)
    #[arg(short = 'u', long = "units", value_name = "FILE", global = true)]
    files: Vec<PathBuf>,
    /// Load every *.units.json file below this directory
    #[arg(short = 'd', long = "dir", value_name = "DIR", global = true)]
    dir: Option<PathBuf>,
    /// JSON message catalog overriding the built-in diagnostics text
    #[arg(short = 'm', long = "messages", value_name = "FILE", global = true)]
    messages: Option<PathBuf>,
    /// Start from an empty unit system instead of SI
    #[arg(long, global = true)]
    no_default_units: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a unit expression and print its canonical units
    ///
    /// Prints `1` for a dimensionless expression. On failure every
    /// diagnostic is shown at its position in the source and the exit
    /// code is 1.
    Parse {
        /// Unit expression, e.g. "kg m^2 / s^3"
        expression: String,
        /// Print the resolution as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
        /// Print diagnostics inline with ASCII markers
        #[arg(long)]
        plain: bool,
    },
    /// Check whether two unit expressions have the same dimensions
    ///
    /// Exits with 0 when they do and 1 otherwise.
    Check { left: String, right: String },
    /// List the loaded unit system
    List,
    /// Check the loaded unit system for circular definitions
    Validate,
    /// Resolve expressions typed at a prompt
    Interactive,
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// API: POST /parse with {source}, POST /check with {left, right},
    /// POST /units with a unit system file, GET /health
    Server {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metrum=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_engine(&cli.units).and_then(|engine| match &cli.command {
        Commands::Parse {
            expression,
            json,
            plain,
        } => parse_command(&engine, expression, *json, *plain),
        Commands::Check { left, right } => check_command(&engine, left, right),
        Commands::List => list_command(&engine),
        Commands::Validate => validate_command(&engine),
        Commands::Interactive => interactive::run_interactive(&engine),
        Commands::Server { host, port } => server_command(engine, host, *port),
    });

    if let Err(e) = result {
        // Check if it's a MetrumError and format it nicely, otherwise use default
        if let Some(metrum_err) = e.downcast_ref::<metrum::MetrumError>() {
            eprintln!("{}", error_formatter::format_error(metrum_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn parse_command(engine: &Engine, expression: &str, json: bool, plain: bool) -> Result<()> {
    debug!(expression, "parse");

    if json {
        let resolution = engine.resolve(expression)?;
        let output = serde_json::json!({
            "source": resolution.source,
            "ok": resolution.is_ok(),
            "units": resolution.units,
            "display": display_units(&resolution.units),
            "diagnostics": resolution.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        if !resolution.is_ok() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if plain {
        match engine.render_with(&InlineRenderer::plain(), expression) {
            Ok(units) => print!("{}", Formatter::default().format_units(&units)),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let units = engine.parse_units(expression)?;
    print!("{}", Formatter::default().format_units(&units));
    Ok(())
}

fn check_command(engine: &Engine, left: &str, right: &str) -> Result<()> {
    debug!(left, right, "check");

    let left_units = engine.parse_units(left)?;
    let right_units = engine.parse_units(right)?;

    if left_units == right_units {
        println!(
            "✓ '{}' and '{}' have the same dimensions: {}",
            left,
            right,
            display_units(&left_units)
        );
        return Ok(());
    }

    println!("✗ '{}' and '{}' differ", left, right);
    println!("  {}: {}", left, display_units(&left_units));
    println!("  {}: {}", right, display_units(&right_units));
    std::process::exit(1);
}

fn list_command(engine: &Engine) -> Result<()> {
    let formatter = Formatter::default();
    print!("{}", formatter.format_unit_system(engine.unit_system()));
    Ok(())
}

fn validate_command(engine: &Engine) -> Result<()> {
    let report = engine.validate();
    let formatter = Formatter::default();
    print!("{}", formatter.format_validation(&report));

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn server_command(engine: Engine, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            tracing::info!(
                "Starting HTTP server with {} unit(s) loaded",
                engine.unit_system().len()
            );
            server::http::start_server(engine, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (engine, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// Build the engine from the global unit options
fn load_engine(options: &UnitOptions) -> Result<Engine> {
    let mut engine = if options.no_default_units {
        Engine::new().with_unit_system(UnitSystem::empty())
    } else {
        Engine::new()
    };

    if let Some(dir) = &options.dir {
        load_workspace(&mut engine, dir)?;
    }

    for file in &options.files {
        load_unit_system(&mut engine, file)?;
    }

    if let Some(path) = &options.messages {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let messages = MessageCatalog::from_json(&json)
            .with_context(|| format!("Invalid message catalog {}", path.display()))?;
        engine.add_messages(messages);
        debug!(path = %path.display(), "loaded messages");
    }

    Ok(engine)
}

/// Load all *.units.json files below `dir`, in path order
fn load_workspace(engine: &mut Engine, dir: &Path) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let is_unit_system = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(UNIT_SYSTEM_SUFFIX));
        if entry.file_type().is_file() && is_unit_system {
            load_unit_system(engine, entry.path())?;
        }
    }

    Ok(())
}

fn load_unit_system(engine: &mut Engine, path: &Path) -> Result<()> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    engine.add_unit_system_json(&json)?;
    debug!(path = %path.display(), units = engine.unit_system().len(), "loaded unit system");
    Ok(())
}
