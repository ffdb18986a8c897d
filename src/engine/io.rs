//! WAV file I/O for Cutplay
//!
//! Reads 16-bit integer PCM WAV files into clips and writes clips back out.
//! No resampling or channel conversion happens here: the clip keeps the
//! file's rate and channel count.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;

use crate::editor::Editor;
use crate::engine::clip::{Clip, Format};
use crate::error::{CutplayError, Result};

/// Import a WAV file as an unmodified clip named after the file
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a readable WAV file
/// * `UnsupportedBitDepth` - If the audio is not 16-bit integer PCM
pub fn import_wav(editor: &Editor, path: &Path) -> Result<Clip> {
    if !path.exists() {
        return Err(CutplayError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = WavReader::open(path).map_err(|e| CutplayError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let clip = read_clip(editor, reader, name)?;
    info!("Imported {} from {}", clip, path.display());
    Ok(clip)
}

/// Import WAV data from any reader
pub fn import_wav_from_reader<R: Read>(editor: &Editor, reader: R, name: &str) -> Result<Clip> {
    let reader = WavReader::new(reader).map_err(|e| CutplayError::InvalidAudio {
        reason: format!("Failed to parse WAV data: {}", e),
        source: Some(Box::new(e)),
    })?;
    read_clip(editor, reader, name.to_string())
}

fn read_clip<R: Read>(editor: &Editor, reader: WavReader<R>, name: String) -> Result<Clip> {
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(CutplayError::UnsupportedBitDepth {
            bit_depth: spec.bits_per_sample,
        });
    }

    let format = Format::new(spec.sample_rate, spec.bits_per_sample, spec.channels)?;

    let mut bytes = Vec::with_capacity(reader.len() as usize * 2);
    for sample in reader.into_samples::<i16>() {
        let sample = sample.map_err(|e| CutplayError::InvalidAudio {
            reason: format!("Failed to read sample: {}", e),
            source: Some(Box::new(e)),
        })?;
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    editor.ingest(name, bytes, format)
}

/// Export a clip to a 16-bit PCM WAV file
///
/// # Errors
/// * `UnsupportedBitDepth` - If the clip is not 16-bit
/// * `InvalidAudio` - If the file cannot be written
pub fn export_wav(clip: &Clip, path: &Path) -> Result<()> {
    let format = clip.format();
    if format.bit_depth != 16 {
        return Err(CutplayError::UnsupportedBitDepth {
            bit_depth: format.bit_depth,
        });
    }

    let spec = WavSpec {
        channels: format.channel_count,
        sample_rate: format.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let write_err = |e: hound::Error| CutplayError::InvalidAudio {
        reason: format!("Failed to write WAV file: {}", e),
        source: Some(Box::new(e)),
    };

    let mut writer = WavWriter::create(path, spec).map_err(write_err)?;
    for pair in clip.buffer().chunks_exact(2) {
        writer
            .write_sample(i16::from_le_bytes([pair[0], pair[1]]))
            .map_err(write_err)?;
    }
    writer.finalize().map_err(write_err)?;

    info!("Exported {} to {}", clip, path.display());
    Ok(())
}

/// Open a WAV file's header without reading samples
pub fn probe_wav(path: &Path) -> Result<WavSpec> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CutplayError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CutplayError::Io(e),
    })?;
    let reader = WavReader::new(BufReader::new(file)).map_err(|e| CutplayError::InvalidAudio {
        reason: format!("Failed to parse WAV header: {}", e),
        source: Some(Box::new(e)),
    })?;
    Ok(reader.spec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_wav(path: &Path, spec: WavSpec, samples: &[i16]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn spec16(channels: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn test_import_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, spec16(2), &[1000, -1000, 2, -2]);

        let editor = Editor::new();
        let clip = import_wav(&editor, &path).unwrap();

        assert_eq!(clip.name(), "tone.wav");
        assert_eq!(*clip.format(), Format::pcm16(8000, 2));
        assert_eq!(clip.buffer(), &[0xE8u8, 0x03, 0x18, 0xFC, 0x02, 0x00, 0xFE, 0xFF]);
        assert!(!clip.is_modified());
    }

    #[test]
    fn test_export_import_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let editor = Editor::new();
        let bytes: Vec<u8> = (0..400u32).map(|i| (i * 13 % 256) as u8).collect();
        let clip = editor
            .ingest("src", bytes.clone(), Format::pcm16(22050, 1))
            .unwrap();
        export_wav(&clip, &path).unwrap();

        let back = import_wav(&editor, &path).unwrap();
        assert_eq!(back.buffer(), bytes.as_slice());
        assert_eq!(back.format(), clip.format());

        let spec = probe_wav(&path).unwrap();
        assert_eq!(spec.sample_rate, 22050);
    }

    #[test]
    fn test_import_missing_file() {
        let editor = Editor::new();
        let result = import_wav(&editor, Path::new("/nonexistent/file.wav"));
        assert!(matches!(result, Err(CutplayError::FileNotFound { .. })));
    }

    #[test]
    fn test_import_rejects_24_bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deep.wav");
        let spec = WavSpec {
            bits_per_sample: 24,
            ..spec16(1)
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(1000i32).unwrap();
        writer.finalize().unwrap();

        let editor = Editor::new();
        assert!(matches!(
            import_wav(&editor, &path),
            Err(CutplayError::UnsupportedBitDepth { bit_depth: 24 })
        ));
    }

    #[test]
    fn test_import_garbage() {
        let editor = Editor::new();
        let result = import_wav_from_reader(&editor, &b"definitely not a wav"[..], "junk");
        assert!(matches!(result, Err(CutplayError::InvalidAudio { .. })));
    }
}
