//! CLI Module
//!
//! Command-line interface for the Cutplay clip editor.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cutplay - edit 16-bit PCM WAV clips
#[derive(Parser, Debug)]
#[command(name = "cutplay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with editor defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show format, duration and checksum of WAV files
    Info {
        /// Input WAV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Remove the span between two times
    Cut {
        input: PathBuf,

        /// Start of the removed span in seconds
        #[arg(long)]
        from: f64,

        /// End of the removed span in seconds
        #[arg(long)]
        to: f64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Insert silence at a position
    Silence {
        input: PathBuf,

        /// Insert position in seconds
        #[arg(long)]
        at: f64,

        /// Length of the silence in seconds
        #[arg(long)]
        seconds: f64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scale the volume by a percentage
    Volume {
        input: PathBuf,

        /// 100 keeps the level, 50 halves it, 200 doubles it
        #[arg(long, allow_hyphen_values = true)]
        percent: i32,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add a constant to every sample
    Offset {
        input: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        delta: i64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fade in from silence
    #[command(name = "fade-in")]
    FadeIn {
        input: PathBuf,

        /// Time at which full level is reached
        #[arg(long)]
        to: f64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fade out to silence at the end
    #[command(name = "fade-out")]
    FadeOut {
        input: PathBuf,

        /// Time at which the fade starts
        #[arg(long)]
        from: f64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove long quiet stretches
    Autocut {
        input: PathBuf,

        /// Quiet threshold in percent of full scale (default from config)
        #[arg(long)]
        threshold: Option<u8>,

        /// Shortest quiet stretch to remove, in seconds (default from config)
        #[arg(long)]
        min_duration: Option<f64>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Join files end to end
    Concat {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mix files together
    Mix {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Subtract instead of add
        #[arg(long)]
        subtract: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cut() {
        let cli = Cli::parse_from(["cutplay", "cut", "in.wav", "--from", "0.5", "--to", "1"]);
        match cli.command {
            Some(Commands::Cut {
                input, from, to, output,
            }) => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert_eq!(from, 0.5);
                assert_eq!(to, 1.0);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_offset() {
        let cli = Cli::parse_from(["cutplay", "offset", "in.wav", "--delta", "-200", "-o", "o.wav"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Offset { delta: -200, .. })
        ));
    }

    #[test]
    fn test_parse_mix_requires_inputs() {
        assert!(Cli::try_parse_from(["cutplay", "mix"]).is_err());
        let cli = Cli::try_parse_from(["cutplay", "-v", "mix", "a.wav", "b.wav", "--subtract"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Mix { subtract: true, ref inputs, .. }) if inputs.len() == 2
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
