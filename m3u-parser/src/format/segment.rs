use std::collections::HashMap;

use smol_str::SmolStr;

/// `<length>[@<offset>]`, a sub-range of a resource in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub length: u64,
    /// `None` means the range starts right after the previous one
    pub offset: Option<u64>,
}

/// Decryption parameters from `#EXT-X-KEY`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentKey {
    pub method: SmolStr,
    pub uri: Option<SmolStr>,
    pub iv: Option<SmolStr>,
    pub keyformat: Option<SmolStr>,
    pub keyformat_versions: Option<SmolStr>,
}

/// Initialization section from `#EXT-X-MAP`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMap {
    pub uri: SmolStr,
    pub byterange: Option<ByteRange>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct M3uSegment {
    /// Location of the resource
    pub file: SmolStr,
    pub title: Option<SmolStr>,
    /// Seconds, `-1` for live or unknown
    pub duration: Option<i64>,
    /// `key="value"` pairs from `#EXTINF`, empty if there were none
    pub attributes: HashMap<SmolStr, SmolStr>,
    pub byte_range: Option<ByteRange>,
    pub key: Option<SegmentKey>,
    pub map: Option<SegmentMap>,
    /// Preceded by `#EXT-X-DISCONTINUITY`
    pub discontinuity: bool,
    /// Raw `#EXT-X-PROGRAM-DATE-TIME` value
    pub program_date_time: Option<SmolStr>,
    /// Attributes of `#EXT-X-DATERANGE`
    pub date_range: Option<HashMap<SmolStr, SmolStr>>,
    /// Directives the parser does not know, keyed by the tag name including `#`
    pub unknown_tags: HashMap<SmolStr, SmolStr>,
}

impl M3uSegment {
    /// A segment of a simple playlist: a location and nothing else
    pub fn from_file(file: impl Into<SmolStr>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }
}
