//! Tag names understood by the parser

/// Sigil shared by every extended directive
pub const EXT: &str = "#EXT";
pub const EXTM3U: &str = "#EXTM3U";
pub const EXTINF: &str = "#EXTINF";

pub const VERSION: &str = "#EXT-X-VERSION";
pub const BYTERANGE: &str = "#EXT-X-BYTERANGE";
pub const DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub const KEY: &str = "#EXT-X-KEY";
pub const MAP: &str = "#EXT-X-MAP";
pub const PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
pub const DATERANGE: &str = "#EXT-X-DATERANGE";

pub const TARGETDURATION: &str = "#EXT-X-TARGETDURATION";
pub const MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
pub const PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE";
pub const ENDLIST: &str = "#EXT-X-ENDLIST";
pub const INDEPENDENT_SEGMENTS: &str = "#EXT-X-INDEPENDENT-SEGMENTS";
