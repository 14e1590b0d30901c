//! Media processing actions: one packaging backend per streaming format,
//! plus fixed-parameter transcoding.

mod cmaf;
mod dash;
mod hls;
mod transcode;

use std::path::{Path, PathBuf};

use mf_core::Format;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

pub use cmaf::{
    ffmpeg_cmaf_command, mp4box_cmaf_command, CMAF_SEGMENT_MS, FFMPEG_INIT_SEGMENT,
    MP4BOX_INIT_SEGMENT,
};
pub use dash::dash_command;
pub use hls::{hls_command, HLS_SEGMENT_SECONDS};
pub use transcode::{h265_command, mp3_command, rung_command, transcode, TRANSCODED_DIR};

/// Build the packaging command for `format`.
///
/// `tool` must be the executable named by [`Format::tool`].
pub fn transmux_command(format: Format, tool: &Path, input: &Path, output_dir: &Path) -> ToolCommand {
    match format {
        Format::Hls => hls_command(tool, input, output_dir),
        Format::Dash => dash_command(tool, input, output_dir),
        Format::Cmaf => mp4box_cmaf_command(tool, input, output_dir),
        Format::CmafFfmpeg => ffmpeg_cmaf_command(tool, input, output_dir),
    }
}

/// Package `input` as `format` into `output_dir`, creating the directory
/// first.
///
/// Returns the path of the manifest / playlist written.
///
/// # Errors
///
/// - [`mf_core::Error::ToolNotFound`] if the format's tool is unavailable.
/// - [`mf_core::Error::Io`] if `output_dir` cannot be created.
/// - [`mf_core::Error::ToolExit`] if the tool exits non-zero; the error
///   carries its stderr verbatim.
pub async fn transmux(
    tools: &ToolRegistry,
    format: Format,
    input: &Path,
    output_dir: &Path,
) -> mf_core::Result<PathBuf> {
    let tool = tools.require(format.tool())?;
    tokio::fs::create_dir_all(output_dir).await?;

    tracing::info!("{} transmux: {:?} -> {:?}", format.label(), input, output_dir);

    transmux_command(format, &tool.path, input, output_dir)
        .execute()
        .await?;

    Ok(output_dir.join(format.manifest_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_format_builds_a_command() {
        for format in Format::ALL {
            let cmd = transmux_command(
                format,
                Path::new(format.tool()),
                Path::new("in.mp4"),
                Path::new("/out/in").join(format.dir_name()).as_path(),
            );
            let last = cmd.get_args().iter().rev().find(|a| {
                a.to_string_lossy().ends_with(format.manifest_name())
            });
            assert!(last.is_some(), "{format}: manifest path missing");
            assert_eq!(cmd.program_name(), format.tool());
        }
    }

    #[tokio::test]
    async fn transmux_missing_tool_does_not_create_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("hls");
        let err = transmux(&ToolRegistry::default(), Format::Hls, Path::new("in.mp4"), &out)
            .await
            .unwrap_err();
        assert!(matches!(err, mf_core::Error::ToolNotFound { ref tool } if tool == "ffmpeg"));
        assert!(!out.exists());
    }
}
