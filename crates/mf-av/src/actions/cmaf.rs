//! CMAF packaging, either with MP4Box or with ffmpeg's dash muxer.
//!
//! Both variants emit `chunk_<N>.m4s` media segments of four seconds each,
//! referenced from `cmaf_output.mpd`. The initialization segment is
//! [`MP4BOX_INIT_SEGMENT`] for MP4Box and [`FFMPEG_INIT_SEGMENT`] for ffmpeg.

use std::path::Path;

use crate::command::ToolCommand;

/// Segment and fragment duration in milliseconds.
pub const CMAF_SEGMENT_MS: u32 = 4000;

/// Segment name template handed to MP4Box; the extension is added by MP4Box.
const MP4BOX_SEGMENT_TEMPLATE: &str = "chunk_$Number$$Init=init$";

/// Initialization segment written by the MP4Box variant. GPAC keeps the
/// literal `chunk_` prefix of the template and uses its default `mp4`
/// extension for init segments.
pub const MP4BOX_INIT_SEGMENT: &str = "chunk_init.mp4";

/// Initialization segment written by the ffmpeg variant.
pub const FFMPEG_INIT_SEGMENT: &str = "init.mp4";

/// Build the MP4Box invocation.
///
/// `-rap` forces segments to start on random access points and
/// `-bs-switching no` keeps one initialization segment per representation.
/// In the segment template `$Init=init$` expands to `init` for the
/// initialization segment only, which yields [`MP4BOX_INIT_SEGMENT`].
pub fn mp4box_cmaf_command(mp4box: &Path, input: &Path, output_dir: &Path) -> ToolCommand {
    let manifest = output_dir.join(mf_core::Format::Cmaf.manifest_name());
    let duration = CMAF_SEGMENT_MS.to_string();

    let mut cmd = ToolCommand::new(mp4box.to_path_buf());
    cmd.args(["-dash", &duration, "-frag", &duration]);
    cmd.args(["-rap", "-bs-switching", "no"]);
    cmd.args(["-segment-name", MP4BOX_SEGMENT_TEMPLATE]);
    cmd.args(["-segment-ext", "m4s"]);
    cmd.arg("-out");
    cmd.arg(manifest);
    cmd.arg(input);
    cmd
}

/// Build the ffmpeg invocation.
///
/// One file per segment (`-single_file 0`) with templated, timeline-based
/// segment addressing.
pub fn ffmpeg_cmaf_command(ffmpeg: &Path, input: &Path, output_dir: &Path) -> ToolCommand {
    let manifest = output_dir.join(mf_core::Format::CmafFfmpeg.manifest_name());
    let seconds = (CMAF_SEGMENT_MS / 1000).to_string();

    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-c", "copy", "-f", "dash"]);
    cmd.args(["-seg_duration", &seconds, "-frag_duration", &seconds]);
    cmd.args(["-use_template", "1", "-use_timeline", "1", "-single_file", "0"]);
    cmd.args(["-init_seg_name", FFMPEG_INIT_SEGMENT]);
    cmd.args(["-media_seg_name", "chunk_$Number$.m4s"]);
    cmd.arg(manifest);
    cmd
}
