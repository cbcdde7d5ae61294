use std::fmt::Display;

use m3u_parser::format::{M3uPlaylist, M3uSegment, PlaylistKind, PlaylistType};

/// Human readable summary of a parsed playlist, headed by its source name
pub struct Summary<'a>(pub &'a str, pub &'a M3uPlaylist);

struct SegmentLine<'a>(usize, &'a M3uSegment);

impl Display for SegmentLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(index, segment) = self;
        write!(f, "  {:>4}. ", index + 1)?;
        match segment.duration {
            Some(-1) => write!(f, "[live] ")?,
            Some(duration) => write!(f, "[{}s] ", duration)?,
            None => {}
        }

        if let Some(title) = segment.title.as_ref().filter(|x| !x.is_empty()) {
            write!(f, "{} -> ", title)?;
        }
        write!(f, "{}", segment.file)?;

        if let Some(range) = &segment.byte_range {
            write!(f, " bytes={}", range.length)?;
            if let Some(offset) = range.offset {
                write!(f, "@{}", offset)?;
            }
        }
        if let Some(key) = &segment.key {
            write!(f, " key={}", key.method)?;
        }
        if let Some(map) = &segment.map {
            write!(f, " map={}", map.uri)?;
        }
        if segment.discontinuity {
            write!(f, " (discontinuity)")?;
        }

        Ok(())
    }
}

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self(name, playlist) = self;
        let kind = match playlist.kind {
            PlaylistKind::Simple => "simple",
            PlaylistKind::Extended => "extended",
        };
        writeln!(f, "{}: {} playlist, {} segments", name, kind, playlist.len())?;

        if let Some(version) = playlist.version {
            writeln!(f, "  version: {}", version)?;
        }
        if let Some(target_duration) = playlist.target_duration {
            writeln!(f, "  target duration: {}s", target_duration)?;
        }
        if let Some(media_sequence) = playlist.media_sequence {
            writeln!(f, "  media sequence: {}", media_sequence)?;
        }
        if let Some(playlist_type) = playlist.playlist_type {
            let playlist_type = match playlist_type {
                PlaylistType::Event => "event",
                PlaylistType::Vod => "vod",
            };
            writeln!(f, "  type: {}", playlist_type)?;
        }
        if playlist.end_list {
            writeln!(f, "  ended")?;
        }

        for (index, segment) in playlist.segments.iter().enumerate() {
            writeln!(f, "{}", SegmentLine(index, segment))?;
        }

        Ok(())
    }
}
