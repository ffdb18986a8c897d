//! CLI Command Implementations
//!
//! Each command imports its inputs, runs one editor operation and writes
//! the resulting clip.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::engine::{export_wav, import_wav, Clip};
use crate::error::{CutplayError, Result};

use super::Commands;

/// Dispatch a parsed command
pub fn run(command: Commands, config: &EditorConfig) -> Result<()> {
    let editor = Editor::new();

    match command {
        Commands::Info { inputs } => show_info(&editor, &inputs),
        Commands::Cut {
            input,
            from,
            to,
            output,
        } => edit_one(&editor, config, &input, output, |clip| {
            editor.cut(clip, from, to)
        }),
        Commands::Silence {
            input,
            at,
            seconds,
            output,
        } => edit_one(&editor, config, &input, output, |clip| {
            editor.insert_silence(clip, at, seconds)
        }),
        Commands::Volume {
            input,
            percent,
            output,
        } => edit_one(&editor, config, &input, output, |clip| {
            editor.volume(clip, percent)
        }),
        Commands::Offset {
            input,
            delta,
            output,
        } => edit_one(&editor, config, &input, output, |clip| {
            editor.offset(clip, delta)
        }),
        Commands::FadeIn { input, to, output } => {
            edit_one(&editor, config, &input, output, |clip| editor.fade_in(clip, to))
        }
        Commands::FadeOut {
            input,
            from,
            output,
        } => edit_one(&editor, config, &input, output, |clip| {
            editor.fade_out(clip, from)
        }),
        Commands::Autocut {
            input,
            threshold,
            min_duration,
            output,
        } => {
            let threshold = threshold.unwrap_or(config.autocut.threshold_percent);
            let min_duration = min_duration.unwrap_or(config.autocut.min_duration_secs);
            edit_one(&editor, config, &input, output, |clip| {
                editor.auto_cut(clip, threshold, min_duration)
            })
        }
        Commands::Concat { inputs, output } => {
            edit_many(&editor, config, &inputs, output, |clips| editor.concat(clips))
        }
        Commands::Mix {
            inputs,
            subtract,
            output,
        } => edit_many(&editor, config, &inputs, output, |clips| {
            if subtract {
                editor.subtract(clips)
            } else {
                editor.add(clips)
            }
        }),
    }
}

/// Print one line per input file
pub fn show_info(editor: &Editor, inputs: &[PathBuf]) -> Result<()> {
    for path in inputs {
        let clip = import_wav(editor, path)?;
        println!("{}", clip);
        println!("  format:   {}", clip.format());
        println!("  frames:   {}", clip.num_frames());
        println!("  sha256:   {}", clip.checksum());
    }
    Ok(())
}

fn edit_one<F>(
    editor: &Editor,
    config: &EditorConfig,
    input: &Path,
    output: Option<PathBuf>,
    op: F,
) -> Result<()>
where
    F: FnOnce(&Clip) -> Result<Clip>,
{
    let clip = import_wav(editor, input)?;
    let result = op(&clip)?;
    write_result(&result, &output_path(input, output, config))
}

fn edit_many<F>(
    editor: &Editor,
    config: &EditorConfig,
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    op: F,
) -> Result<()>
where
    F: FnOnce(&[&Clip]) -> Result<Clip>,
{
    let first = inputs.first().ok_or(CutplayError::EmptyInput {
        operation: "command",
    })?;
    let clips = inputs
        .iter()
        .map(|path| import_wav(editor, path))
        .collect::<Result<Vec<_>>>()?;
    let refs: Vec<&Clip> = clips.iter().collect();

    let result = op(&refs)?;
    write_result(&result, &output_path(first, output, config))
}

fn write_result(clip: &Clip, path: &Path) -> Result<()> {
    export_wav(clip, path)?;
    info!("Wrote {}", path.display());
    println!("{} -> {}", clip, path.display());
    Ok(())
}

/// Explicit output path, or `<stem><suffix>.wav` next to the input
pub fn output_path(input: &Path, output: Option<PathBuf>, config: &EditorConfig) -> PathBuf {
    output.unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip".to_string());
        input.with_file_name(format!("{}{}.wav", stem, config.output_suffix))
    })
}
