use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use swfstream::avm1::ActionRecord;
use swfstream::{DecodeOptions, Movie, Registries, TagRecord};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swfstream", about = "Inspect the tag tree and action bytecode of SWF files")]
struct Cli {
    /// JSON file with decode options (missing fields keep their defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the movie header.
    Header {
        /// Path to a .swf file.
        file: PathBuf,
    },
    /// Print the tag tree, sprites indented under their container.
    Tags {
        /// Path to a .swf file.
        file: PathBuf,
        /// Emit the full decoded tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List every action in the movie with its offset.
    Actions {
        /// Path to a .swf file.
        file: PathBuf,
        /// Emit the action records as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_options(path: Option<&Path>) -> Result<DecodeOptions> {
    let Some(path) = path else {
        return Ok(DecodeOptions::default());
    };
    let file = File::open(path).with_context(|| format!("failed to open config: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn load_movie(file: &Path, options: &DecodeOptions) -> Result<Movie> {
    let registries = Registries::standard().context("failed to build loader registries")?;
    let f = File::open(file).with_context(|| format!("failed to open movie: {}", file.display()))?;
    Movie::from_reader(BufReader::new(f), &registries, options)
        .with_context(|| format!("failed to decode movie: {}", file.display()))
}

fn cmd_header(file: &Path, options: &DecodeOptions) -> Result<()> {
    let movie = load_movie(file, options)?;
    let h = &movie.header;
    println!("Version:     {}", h.version);
    println!("Compression: {:?}", h.compression);
    println!("File length: {}", h.file_length);
    println!(
        "Frame size:  {}x{} px",
        h.frame_size.width_px(),
        h.frame_size.height_px()
    );
    println!("Frame rate:  {} fps", h.frames_per_second());
    println!("Frames:      {}", h.frame_count);
    println!("Tags:        {}", movie.tags.len());
    Ok(())
}

fn print_tags(tags: &[TagRecord], depth: usize) {
    for record in tags {
        println!(
            "{:indent$}{:#010x} {} (code {}, {} bytes)",
            "",
            record.header.offset,
            record.tag.name(),
            record.header.code,
            record.header.length,
            indent = depth * 2
        );
        print_tags(record.tag.children(), depth + 1);
    }
}

fn cmd_tags(file: &Path, json: bool, options: &DecodeOptions) -> Result<()> {
    let movie = load_movie(file, options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
    } else {
        print_tags(&movie.tags, 0);
    }
    Ok(())
}

fn cmd_actions(file: &Path, json: bool, options: &DecodeOptions) -> Result<()> {
    let movie = load_movie(file, options)?;
    let actions = movie.actions();
    if json {
        let records: Vec<&ActionRecord> = actions.iter().map(|(_, a)| *a).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    for (tag, action) in actions {
        let name = action
            .name()
            .map_or_else(|| format!("Unknown({:#04x})", action.opcode), |op| op.to_string());
        println!(
            "{:#010x} [{}] {} {:?}",
            action.offset,
            tag.tag.name(),
            name,
            action.operand
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_deref())?;
    debug!(?options, "decode options");
    match &cli.command {
        Command::Header { file } => cmd_header(file, &options),
        Command::Tags { file, json } => cmd_tags(file, *json, &options),
        Command::Actions { file, json } => cmd_actions(file, *json, &options),
    }
}
