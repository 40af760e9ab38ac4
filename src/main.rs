//! marklog - Markdown to Naver Blog editor HTML

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use marklog::{Converter, Preset, StyleConfig, decode_text};

#[derive(Parser)]
#[command(name = "marklog")]
#[command(version, about = "Convert Markdown into inline-styled HTML for the Naver Blog editor", long_about = None)]
#[command(after_help = "EXAMPLES:
    marklog post.md -o post.html        Convert with the default style
    marklog post.md -p modern           Use a built-in preset
    marklog post.md -c style.json       Use a JSON style configuration
    cat post.md | marklog > post.html   Read stdin, write stdout")]
struct Cli {
    /// Markdown file to convert (stdin when absent or `-`)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JSON style configuration; missing fields take default values
    #[arg(short, long, value_name = "CONFIG", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in style preset
    #[arg(short, long, value_name = "PRESET", default_value = "default")]
    preset: Preset,

    /// Input encoding label used when the file is not UTF-8 (e.g. euc-kr)
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// Print the effective style configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// List the built-in presets and exit
    #[arg(long)]
    list_presets: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins when set; otherwise the flags pick the level.
fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> marklog::Result<()> {
    if cli.list_presets {
        for preset in Preset::ALL {
            println!("{preset}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => StyleConfig::from_path(path)?,
        None => cli.preset.config(),
    };

    if cli.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let bytes = read_input(cli.input.as_deref())?;
    let markdown = decode_text(&bytes, cli.encoding.as_deref());
    let html = Converter::new(config).convert(&markdown);

    match &cli.output {
        Some(path) => {
            std::fs::write(path, html)?;
            tracing::info!(path = %path.display(), "wrote html");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read(path),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}
