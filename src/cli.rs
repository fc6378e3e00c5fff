//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Turn an image into a short narrated story: caption, story, speech.
#[derive(Parser, Debug)]
#[command(name = "imagetale", version, about)]
pub struct Cli {
    /// JPEG or PNG image to tell a story about (`-` reads it from stdin).
    pub image: PathBuf,

    /// Narration output file (default: `<output-dir>/<request-id>-story_speech.mp3`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for narrations and kept uploads (overrides config).
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Identifier keying this run's output files: lowercase letters, digits
    /// and single hyphens (default: a fresh UUID).
    #[arg(short, long)]
    pub request_id: Option<String>,

    /// Keep a copy of the image in the output directory under a synthetic name.
    #[arg(short, long)]
    pub keep_image: bool,

    /// Captioning model name or alias (overrides config).
    #[arg(long)]
    pub caption_model: Option<String>,

    /// Story model name or alias (overrides config).
    #[arg(long)]
    pub story_model: Option<String>,

    /// Speech model name or alias (overrides config).
    #[arg(long)]
    pub speech_model: Option<String>,

    /// Timeout for each remote call, in seconds (overrides config).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the result as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
