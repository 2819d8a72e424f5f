//! Container names and detection results

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownContainerName;

macro_rules! containers {
    ($($variant:ident = $id:literal, $name:literal, $description:literal;)+) => {
        /// Media container or elementary stream format.
        ///
        /// The numeric values are stable identifiers used for aggregated
        /// telemetry. Never renumber a variant; new formats are appended.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum MediaContainerName {
            $(
                #[doc = $description]
                $variant = $id,
            )+
        }

        impl MediaContainerName {
            /// Every container, in id order.
            pub const ALL: [Self; containers!(@count $($variant)+)] = [$(Self::$variant),+];

            /// Short lowercase key, e.g. `"mpeg2ts"`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Human-readable label.
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $description,)+
                }
            }

            /// Look up a container by its stable id.
            pub fn from_id(id: u32) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
    (@count $($variant:ident)+) => { 0 $(+ containers!(@one $variant))+ };
    (@one $variant:ident) => { 1 };
}

containers! {
    Unknown = 0, "unknown", "Unknown";
    Aac = 1, "aac", "AAC (Advanced Audio Coding)";
    Ac3 = 2, "ac3", "AC-3";
    Aiff = 3, "aiff", "AIFF (Audio Interchange File Format)";
    Amr = 4, "amr", "AMR (Adaptive Multi-Rate Audio)";
    Ape = 5, "ape", "APE (Monkey's Audio)";
    Asf = 6, "asf", "ASF (Advanced / Active Streaming Format)";
    Ass = 7, "ass", "SSA (SubStation Alpha) subtitle";
    Avi = 8, "avi", "AVI (Audio Video Interleaved)";
    Bink = 9, "bink", "Bink";
    Caf = 10, "caf", "CAF (Apple Core Audio Format)";
    Dts = 11, "dts", "DTS";
    DtsHd = 12, "dtshd", "DTS-HD";
    Dv = 13, "dv", "DV (Digital Video)";
    Dxa = 14, "dxa", "DXA";
    Eac3 = 15, "eac3", "Enhanced AC-3";
    Flac = 16, "flac", "FLAC (Free Lossless Audio Codec)";
    Flv = 17, "flv", "FLV (Flash Video)";
    Gsm = 18, "gsm", "GSM (Global System for Mobile Audio)";
    H261 = 19, "h261", "H.261";
    H263 = 20, "h263", "H.263";
    H264 = 21, "h264", "H.264";
    Hls = 22, "hls", "HLS (Apple HTTP Live Streaming PlayList)";
    Ircam = 23, "ircam", "Berkeley/IRCAM/CARL Sound Format";
    Mjpeg = 24, "mjpeg", "MJPEG video";
    Mov = 25, "mov", "QuickTime / MOV / MPEG4";
    Mp3 = 26, "mp3", "MP3 (MPEG audio layer 2/3)";
    Mpeg2Ps = 27, "mpeg2ps", "MPEG-2 Program Stream";
    Mpeg2Ts = 28, "mpeg2ts", "MPEG-2 Transport Stream";
    Mpeg4Bs = 29, "mpeg4bs", "MPEG-4 Bitstream";
    Ogg = 30, "ogg", "Ogg";
    Rm = 31, "rm", "RM (RealMedia)";
    Srt = 32, "srt", "SRT (SubRip subtitle)";
    Swf = 33, "swf", "SWF (ShockWave Flash)";
    Vc1 = 34, "vc1", "VC-1";
    Wav = 35, "wav", "WAV / WAVE (Waveform Audio)";
    WebM = 36, "webm", "Matroska / WebM";
    Wtv = 37, "wtv", "WTV (Windows Television)";
    Dash = 38, "dash", "DASH (MPEG-DASH)";
    SmoothStream = 39, "smoothstream", "SmoothStreaming";
}

impl MediaContainerName {
    /// Stable numeric id.
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Whether this is anything other than [`MediaContainerName::Unknown`].
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl Default for MediaContainerName {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for MediaContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl FromStr for MediaContainerName {
    type Err = UnknownContainerName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| UnknownContainerName(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MediaContainerName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MediaContainerName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// Which part of the detection order produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stage {
    /// ISO-BMFF atom walk, always tried first
    Mov,
    /// Magic number lookup on the first bytes
    FirstBytes,
    /// Scanning checks for formats without a fixed magic
    Fallback,
    /// AC-3 sync word found past the start of the buffer
    Ac3Scan {
        /// Offset of the sync word
        offset: usize,
    },
    /// Nothing matched
    None,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Mov => write!(f, "mov"),
            Stage::FirstBytes => write!(f, "first-bytes"),
            Stage::Fallback => write!(f, "fallback"),
            Stage::Ac3Scan { offset } => write!(f, "ac3-scan@{}", offset),
            Stage::None => write!(f, "none"),
        }
    }
}

/// Classification result with the stage that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Detection {
    /// Detected container
    pub container: MediaContainerName,
    /// Stage that matched
    pub stage: Stage,
}

impl Detection {
    pub(crate) fn new(container: MediaContainerName, stage: Stage) -> Self {
        Self { container, stage }
    }

    pub(crate) fn unknown() -> Self {
        Self::new(MediaContainerName::Unknown, Stage::None)
    }
}
