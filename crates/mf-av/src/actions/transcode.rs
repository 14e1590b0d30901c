//! Re-encoding with fixed codec parameters: HEVC, an H.264 resolution
//! ladder, and MP3 audio extraction.

use std::path::{Path, PathBuf};

use mf_core::{Rung, TranscodeTask, RESOLUTION_LADDER};

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// Name of the directory transcoded files are written into.
pub const TRANSCODED_DIR: &str = "transcoded";

/// HEVC video at CRF 28; audio is copied.
pub fn h265_command(ffmpeg: &Path, input: &Path, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-c:v", "libx265", "-crf", "28", "-c:a", "copy"]);
    cmd.arg(output);
    cmd
}

/// One H.264/AAC rendition scaled to the rung's resolution at CRF 23.
pub fn rung_command(ffmpeg: &Path, input: &Path, output: &Path, rung: &Rung) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-vf", &rung.scale_filter()]);
    cmd.args(["-c:v", "libx264", "-crf", "23", "-c:a", "aac"]);
    cmd.arg(output);
    cmd
}

/// Drop video and encode audio to MP3 at 192 kbit/s.
pub fn mp3_command(ffmpeg: &Path, input: &Path, output: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-vn", "-c:a", "libmp3lame", "-b:a", "192k"]);
    cmd.arg(output);
    cmd
}

/// Run one transcode task, writing into `output_dir` (created if missing).
///
/// Returns the files produced. For [`TranscodeTask::Resolutions`] every
/// rung is encoded in turn even if an earlier one fails; the task then
/// fails with [`mf_core::Error::ToolExit`] whose stderr lists each failed
/// rung as `<label>: <stderr>`.
pub async fn transcode(
    tools: &ToolRegistry,
    task: TranscodeTask,
    input: &Path,
    output_dir: &Path,
) -> mf_core::Result<Vec<PathBuf>> {
    let ffmpeg = tools.require("ffmpeg")?;
    tokio::fs::create_dir_all(output_dir).await?;

    tracing::info!("transcode {task}: {:?} -> {:?}", input, output_dir);

    match task {
        TranscodeTask::H265 => {
            let output = output_dir.join("output_h265.mp4");
            h265_command(&ffmpeg.path, input, &output).execute().await?;
            Ok(vec![output])
        }
        TranscodeTask::Resolutions => {
            let mut produced = Vec::with_capacity(RESOLUTION_LADDER.len());
            let mut failed: Vec<(&str, Option<i32>, String)> = Vec::new();

            for rung in &RESOLUTION_LADDER {
                let output = output_dir.join(format!("{}.mp4", rung.label));
                match rung_command(&ffmpeg.path, input, &output, rung)
                    .execute()
                    .await
                {
                    Ok(_) => {
                        tracing::debug!("{} rendition written to {:?}", rung.label, output);
                        produced.push(output);
                    }
                    Err(mf_core::Error::ToolExit { code, stderr, .. }) => {
                        tracing::warn!("{} rendition failed: {}", rung.label, stderr.trim());
                        failed.push((rung.label, code, stderr));
                    }
                    Err(e) => return Err(e),
                }
            }

            match failed.first() {
                None => Ok(produced),
                Some(&(_, code, _)) => Err(mf_core::Error::ToolExit {
                    tool: "ffmpeg".to_string(),
                    code,
                    stderr: failed
                        .iter()
                        .map(|(label, _, stderr)| format!("{label}: {}", stderr.trim()))
                        .collect::<Vec<_>>()
                        .join("\n"),
                }),
            }
        }
        TranscodeTask::Mp3Audio => {
            let output = output_dir.join("output_audio.mp3");
            mp3_command(&ffmpeg.path, input, &output).execute().await?;
            Ok(vec![output])
        }
    }
}
