use smol_str::SmolStr;
use std::collections::HashMap;

use crate::format::M3uSegment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistKind {
    /// Bare list of locations, no directives
    #[default]
    Simple,
    /// Starts with `#EXTM3U`
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistType {
    Event,
    Vod,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct M3uPlaylist {
    pub kind: PlaylistKind,
    /// Attributes trailing the `#EXTM3U` marker
    pub attributes: HashMap<SmolStr, SmolStr>,
    /// `#EXT-X-VERSION`
    pub version: Option<i64>,
    /// `#EXT-X-TARGETDURATION`
    pub target_duration: Option<u64>,
    /// `#EXT-X-MEDIA-SEQUENCE`
    pub media_sequence: Option<u64>,
    /// `#EXT-X-PLAYLIST-TYPE`
    pub playlist_type: Option<PlaylistType>,
    /// `#EXT-X-ENDLIST` was seen
    pub end_list: bool,
    /// `#EXT-X-INDEPENDENT-SEGMENTS` was seen
    pub independent_segments: bool,
    /// Segments of this playlist, in document order
    pub segments: Vec<M3uSegment>,
}

impl M3uPlaylist {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
