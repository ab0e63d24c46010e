use std::{
    io::{self, Read, Write},
    path::PathBuf,
};

use camera_params_core::{AppConfig, ParameterMap, ParamsError};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() -> camera_params_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input, json } => run_decode(input, json),
        Commands::Get { key, input } => run_get(&key, input),
        Commands::Set {
            assignments,
            remove,
            input,
        } => run_set(&assignments, &remove, input),
        Commands::Inspect { input } => run_inspect(input),
        Commands::Check { config, input } => run_check(&config, input),
    }
}

fn run_decode(input: Option<String>, json: bool) -> camera_params_core::Result<()> {
    let params = read_params(input)?;
    tracing::info!(entries = params.len(), "decoded parameters");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &params)
            .map_err(|err| ParamsError::msg(err.to_string()))?;
        writeln!(out)?;
        Ok(())
    } else {
        params.dump_to(out)
    }
}

fn run_get(key: &str, input: Option<String>) -> camera_params_core::Result<()> {
    let params = read_params(input)?;
    match params.get(key) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(ParamsError::msg(format!("parameter `{key}` is not set"))),
    }
}

fn run_set(
    assignments: &[String],
    remove: &[String],
    input: Option<String>,
) -> camera_params_core::Result<()> {
    let mut params = match input {
        Some(text) => ParameterMap::from_flattened(&text),
        None => ParameterMap::new(),
    };

    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ParamsError::msg(format!("expected KEY=VALUE, got `{assignment}`")))?;
        params.set(key, value)?;
    }
    for key in remove {
        params.remove(key);
    }

    tracing::debug!(entries = params.len(), "applied assignments");
    println!("{}", params.flatten());
    Ok(())
}

fn run_inspect(input: Option<String>) -> camera_params_core::Result<()> {
    let params = read_params(input)?;
    params.dump();

    println!("preview size:        {}", params.preview_size());
    println!("picture size:        {}", params.picture_size());
    println!("video size:          {}", params.video_size());
    println!("preferred for video: {}", params.preferred_preview_size_for_video());
    println!("preview fps range:   {}", params.preview_fps_range());
    println!("preview frame rate:  {}", params.preview_frame_rate());
    println!("preview sizes:       {}", join(&params.supported_preview_sizes()));
    println!("picture sizes:       {}", join(&params.supported_picture_sizes()));
    println!("video sizes:         {}", join(&params.supported_video_sizes()));
    println!("fps ranges:          {}", join(&params.supported_preview_fps_ranges()));
    println!("focus areas:         {}", join(&params.focus_areas()));
    println!("metering areas:      {}", join(&params.metering_areas()));
    match params.focus_distances() {
        Some(distances) => println!("focus distances:     {distances}"),
        None => println!("focus distances:     unknown"),
    }
    Ok(())
}

fn run_check(config: &PathBuf, input: Option<String>) -> camera_params_core::Result<()> {
    let config = AppConfig::load(config)?;
    let params = read_params(input)?;

    let inactive = config.hardware.inactive_keys(&params);
    if inactive.is_empty() {
        tracing::info!(profile = %config.hardware.name, "all keys are active");
        return Ok(());
    }

    for key in &inactive {
        println!("{key}");
    }
    Err(ParamsError::msg(format!(
        "{} key(s) are not supported by profile `{}`",
        inactive.len(),
        config.hardware.name
    )))
}

/// Uses the positional argument when given, otherwise reads stdin.
fn read_params(input: Option<String>) -> camera_params_core::Result<ParameterMap> {
    let text = match input {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    Ok(ParameterMap::from_flattened(&text))
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and edit flattened camera parameters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every entry of a flattened parameter string.
    Decode {
        /// Flattened parameters; read from stdin when omitted.
        input: Option<String>,
        /// Emit a JSON object instead of `key: value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Print the value of a single key.
    Get {
        key: String,
        /// Flattened parameters; read from stdin when omitted.
        input: Option<String>,
    },
    /// Apply KEY=VALUE assignments and print the new flattened string.
    Set {
        assignments: Vec<String>,
        /// Keys to delete after the assignments are applied.
        #[arg(short, long)]
        remove: Vec<String>,
        /// Flattened parameters to start from.
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show the typed view of the well-known keys.
    Inspect {
        /// Flattened parameters; read from stdin when omitted.
        input: Option<String>,
    },
    /// List keys that the configured hardware profile does not support.
    Check {
        /// JSON file holding the hardware profile.
        #[arg(short, long)]
        config: PathBuf,
        /// Flattened parameters; read from stdin when omitted.
        input: Option<String>,
    },
}
