//! HLS playlist generation using ffmpeg `-c copy`.

use std::path::Path;

use crate::command::ToolCommand;

/// Segment length in seconds.
pub const HLS_SEGMENT_SECONDS: u32 = 10;

/// Build the ffmpeg invocation producing `<output_dir>/hls_output.m3u8`.
///
/// Streams are copied, segments are numbered from 0, and the playlist keeps
/// every segment (`-hls_list_size 0`, no sliding window).
pub fn hls_command(ffmpeg: &Path, input: &Path, output_dir: &Path) -> ToolCommand {
    let playlist = output_dir.join(mf_core::Format::Hls.manifest_name());

    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-c", "copy", "-start_number", "0"]);
    cmd.args(["-hls_time", &HLS_SEGMENT_SECONDS.to_string()]);
    cmd.args(["-hls_list_size", "0"]);
    cmd.args(["-f", "hls"]);
    cmd.arg(playlist);
    cmd
}
