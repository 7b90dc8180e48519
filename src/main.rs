use goref::config::Config;
use goref::core::Command;
use goref::core::ResolutionRequest;
use goref::output::ResponseEnvelope;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Long flags that may also be spelled with a single dash (`-inputCmd x`)
const SINGLE_DASH_FLAGS: [&str; 4] = ["inputFilePath", "inputOffset", "inputCmd", "config"];

/// goref - jump between MVC controller actions and their view templates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File the cursor is in
    #[arg(long = "inputFilePath")]
    input_file_path: Option<String>,

    /// Byte offset of the cursor
    #[arg(long = "inputOffset", default_value_t = 0)]
    input_offset: usize,

    /// mvc_goto_view or mvc_goto_action
    #[arg(long = "inputCmd")]
    input_cmd: Option<String>,

    /// Config file (default: goref.toml searched upward from the input file)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

/// Rewrite `-inputCmd` style flags to `--inputCmd`, the way editors call the
/// tool with Go flag syntax
fn normalize_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| long_form(&arg).unwrap_or(arg))
        .collect()
}

fn long_form(arg: &OsStr) -> Option<OsString> {
    let text = arg.to_str()?;
    let flag = text.strip_prefix('-')?;
    let name = flag.split('=').next().unwrap_or(flag);
    SINGLE_DASH_FLAGS
        .contains(&name)
        .then(|| OsString::from(format!("-{}", text)))
}

fn main() -> Result<()> {
    let args = Args::parse_from(normalize_flags(std::env::args_os()));

    // Setup logging with RUST_LOG environment variable
    // Default to "warn" if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries only the JSON record
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let file_path = args
        .input_file_path
        .filter(|path| !path.is_empty())
        .map(PathBuf::from);
    let input_cmd = args.input_cmd.filter(|cmd| !cmd.is_empty());

    let (Some(file_path), Some(input_cmd)) = (file_path, input_cmd) else {
        eprintln!("{}", Args::command().render_help());
        return Ok(());
    };

    let command = match input_cmd.parse::<Command>() {
        Ok(command) => command,
        Err(e) => {
            warn!("{}", e);
            let envelope = ResponseEnvelope::rejected(&file_path, args.input_offset, &input_cmd, &e);
            println!("{}", envelope.to_json()?);
            return Ok(());
        }
    };

    let config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            Config::load(path)?
        }
        None => Config::discover(&file_path),
    };

    let request = ResolutionRequest::new(file_path, args.input_offset, command);
    let envelope = goref::run(request, config);

    // Output to stdout
    println!("{}", envelope.to_json()?);

    Ok(())
}
