//! MPEG-DASH manifest generation using ffmpeg `-c copy`.

use std::path::Path;

use crate::command::ToolCommand;

/// Build the ffmpeg invocation producing `<output_dir>/dash_output.mpd`.
///
/// Media for each representation is written as a single file referenced by
/// the manifest rather than as numbered segments.
pub fn dash_command(ffmpeg: &Path, input: &Path, output_dir: &Path) -> ToolCommand {
    let manifest = output_dir.join(mf_core::Format::Dash.manifest_name());

    let mut cmd = ToolCommand::new(ffmpeg.to_path_buf());
    cmd.args(["-y", "-i"]);
    cmd.arg(input);
    cmd.args(["-c", "copy", "-f", "dash", "-single_file", "1"]);
    cmd.arg(manifest);
    cmd
}
