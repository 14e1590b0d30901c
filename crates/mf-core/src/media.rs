//! Media-domain enums for output formats and transcode tasks.
//!
//! All enums serialize in kebab-case and implement `Display` manually for
//! consistent string representation. `FromStr` accepts the same identifiers
//! the CLI takes, case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Streaming output formats produced by transmuxing.
///
/// The two CMAF variants write the same layout into the same subdirectory;
/// they differ only in the external tool used to package it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// HTTP Live Streaming: `.m3u8` playlist plus segments.
    Hls,
    /// MPEG-DASH: `.mpd` manifest with a single media file.
    #[serde(alias = "mpeg-dash")]
    Dash,
    /// CMAF packaged by MP4Box.
    Cmaf,
    /// CMAF packaged by ffmpeg's dash muxer.
    CmafFfmpeg,
}

impl Format {
    /// Every known format, in declaration order.
    pub const ALL: [Format; 4] = [Format::Hls, Format::Dash, Format::Cmaf, Format::CmafFfmpeg];

    /// Formats produced when the caller does not ask for any in particular.
    pub const DEFAULT_SET: [Format; 3] = [Format::Hls, Format::Dash, Format::Cmaf];

    /// Identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Hls => "hls",
            Self::Dash => "dash",
            Self::Cmaf => "cmaf",
            Self::CmafFfmpeg => "cmaf-ffmpeg",
        }
    }

    /// Label used in console output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hls => "HLS",
            Self::Dash => "MPEG-DASH",
            Self::Cmaf | Self::CmafFfmpeg => "CMAF",
        }
    }

    /// Name of the per-format subdirectory under `<output_root>/<stem>/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Hls => "hls",
            Self::Dash => "mpeg-dash",
            Self::Cmaf | Self::CmafFfmpeg => "cmaf",
        }
    }

    /// File name of the playlist / manifest written into [`Format::dir_name`].
    pub fn manifest_name(self) -> &'static str {
        match self {
            Self::Hls => "hls_output.m3u8",
            Self::Dash => "dash_output.mpd",
            Self::Cmaf | Self::CmafFfmpeg => "cmaf_output.mpd",
        }
    }

    /// The external tool that produces this format.
    pub fn tool(self) -> &'static str {
        match self {
            Self::Hls | Self::Dash | Self::CmafFfmpeg => "ffmpeg",
            Self::Cmaf => "MP4Box",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hls" => Ok(Self::Hls),
            "dash" | "mpeg-dash" => Ok(Self::Dash),
            "cmaf" => Ok(Self::Cmaf),
            "cmaf-ffmpeg" => Ok(Self::CmafFfmpeg),
            other => Err(Error::Validation(format!(
                "unknown format '{other}' (expected one of: hls, dash, cmaf, cmaf-ffmpeg)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// TranscodeTask
// ---------------------------------------------------------------------------

/// Re-encoding tasks written into `<output_root>/transcoded/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranscodeTask {
    /// HEVC video at CRF 28, audio copied.
    H265,
    /// H.264/AAC resolution ladder (see [`RESOLUTION_LADDER`]).
    Resolutions,
    /// Audio-only MP3 at 192 kbit/s.
    Mp3Audio,
}

impl TranscodeTask {
    /// Identifier used on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Self::H265 => "h265",
            Self::Resolutions => "resolutions",
            Self::Mp3Audio => "mp3-audio",
        }
    }

    /// Label used in console output.
    pub fn label(self) -> &'static str {
        match self {
            Self::H265 => "H.265",
            Self::Resolutions => "Resolutions",
            Self::Mp3Audio => "MP3 audio",
        }
    }
}

impl fmt::Display for TranscodeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for TranscodeTask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "h265" | "hevc" => Ok(Self::H265),
            "resolutions" => Ok(Self::Resolutions),
            "mp3-audio" | "mp3" => Ok(Self::Mp3Audio),
            other => Err(Error::Validation(format!(
                "unknown transcode task '{other}' (expected one of: h265, resolutions, mp3-audio)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution ladder
// ---------------------------------------------------------------------------

/// One rung of the [`TranscodeTask::Resolutions`] ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rung {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Rung {
    /// The `scale` filter argument for this rung, e.g. `scale=1280x720`.
    pub fn scale_filter(&self) -> String {
        format!("scale={}x{}", self.width, self.height)
    }
}

/// Fixed resolution ladder, highest first.
pub const RESOLUTION_LADDER: [Rung; 3] = [
    Rung { label: "1080p", width: 1920, height: 1080 },
    Rung { label: "720p", width: 1280, height: 720 },
    Rung { label: "480p", width: 854, height: 480 },
];
