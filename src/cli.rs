use clap::{Parser, Subcommand};
use mf_core::{Format, TranscodeTask};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "muxforge")]
#[command(author, version, about = "Parallel multi-format transmuxing orchestrator")]
pub struct Cli {
    /// Path to config file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Package one input into several streaming formats in parallel
    Transmux {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Output root; files land in <OUTPUT_DIR>/<input name>/<format>/
        #[arg(required = true)]
        output_dir: PathBuf,

        /// Formats to produce (hls, dash, cmaf, cmaf-ffmpeg)
        #[arg(long, num_args = 0..)]
        formats: Option<Vec<Format>>,

        /// Maximum concurrent jobs (default: cores - 2, at least 1)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Abort before starting if a required tool is missing
        #[arg(long)]
        strict_tools: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-encode one input with fixed codec settings
    Transcode {
        /// Input media file
        #[arg(required = true)]
        input: PathBuf,

        /// Output root; files land in <OUTPUT_DIR>/transcoded/
        #[arg(required = true)]
        output_dir: PathBuf,

        /// Tasks to run (h265, resolutions, mp3-audio)
        #[arg(long, num_args = 1.., required = true)]
        tasks: Vec<TranscodeTask>,

        /// Maximum concurrent jobs (default: cores - 2, at least 1)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_into_enum() {
        let cli = Cli::parse_from([
            "muxforge", "transmux", "movie.mp4", "/out", "--formats", "hls", "CMAF",
        ]);
        match cli.command {
            Commands::Transmux { formats, .. } => {
                assert_eq!(formats, Some(vec![Format::Hls, Format::Cmaf]));
            }
            _ => panic!("expected transmux"),
        }
    }

    #[test]
    fn formats_flag_without_values_is_an_empty_request() {
        let cli = Cli::parse_from(["muxforge", "transmux", "movie.mp4", "/out", "--formats"]);
        match cli.command {
            Commands::Transmux { formats, .. } => assert_eq!(formats, Some(Vec::new())),
            _ => panic!("expected transmux"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = Cli::try_parse_from([
            "muxforge", "transmux", "movie.mp4", "/out", "--formats", "webm",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["muxforge", "check-tools", "-v", "-c", "mf.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("mf.json")));
    }
}
