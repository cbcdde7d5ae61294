use std::{collections::HashMap, mem::take, str::FromStr};

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use smol_str::SmolStr;

use crate::{
    ParseError,
    attributes::{parse_attribute_list, parse_attributes},
    directive::{Directive, parse_byte_range},
    format::{
        ByteRange, M3uPlaylist, M3uSegment, PlaylistKind, PlaylistType, SegmentKey, SegmentMap,
        directives,
    },
    lines::Line,
};

lazy_static! {
    static ref DURATION_REGEX: Regex = Regex::new("^-?[0-9]+").expect("Regular expression error");
}

/// Segment-scoped state collected until the next location line
#[derive(Debug, Default)]
struct PendingSegment {
    /// Line of the `#EXTINF` that opened this segment
    opened_at: usize,
    title: Option<SmolStr>,
    duration: Option<i64>,
    attributes: HashMap<SmolStr, SmolStr>,
    byte_range: Option<ByteRange>,
    discontinuity: bool,
    program_date_time: Option<SmolStr>,
    date_range: Option<HashMap<SmolStr, SmolStr>>,
    unknown_tags: HashMap<SmolStr, SmolStr>,
}

impl PendingSegment {
    fn is_blank(&self) -> bool {
        self.title.is_none() && self.duration.is_none()
    }

    fn has_directives(&self) -> bool {
        self.byte_range.is_some()
            || self.discontinuity
            || self.program_date_time.is_some()
            || self.date_range.is_some()
            || !self.unknown_tags.is_empty()
    }

    fn into_segment(
        self,
        file: SmolStr,
        key: Option<SegmentKey>,
        map: Option<SegmentMap>,
    ) -> M3uSegment {
        M3uSegment {
            file,
            title: self.title,
            duration: self.duration,
            attributes: self.attributes,
            byte_range: self.byte_range,
            key,
            map,
            discontinuity: self.discontinuity,
            program_date_time: self.program_date_time,
            date_range: self.date_range,
            unknown_tags: self.unknown_tags,
        }
    }
}

fn parse_value<T: FromStr>(value: &str, line: usize, tag: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidFormat {
        line,
        tag,
        detail: None,
    })
}

fn parse_key(value: &str, line: usize) -> Result<Option<SegmentKey>, ParseError> {
    let mut attributes = parse_attribute_list(value);
    let method = attributes
        .remove("METHOD")
        .filter(|x| !x.is_empty())
        .ok_or(ParseError::InvalidFormat {
            line,
            tag: directives::KEY,
            detail: Some("METHOD is missing"),
        })?;

    if method.as_str() == "NONE" {
        return Ok(None);
    }

    Ok(Some(SegmentKey {
        method,
        uri: attributes.remove("URI"),
        iv: attributes.remove("IV"),
        keyformat: attributes.remove("KEYFORMAT"),
        keyformat_versions: attributes.remove("KEYFORMATVERSIONS"),
    }))
}

fn parse_map(value: &str, line: usize) -> Result<SegmentMap, ParseError> {
    let mut attributes = parse_attribute_list(value);
    let uri = attributes
        .remove("URI")
        .filter(|x| !x.is_empty())
        .ok_or(ParseError::InvalidFormat {
            line,
            tag: directives::MAP,
            detail: Some("URI is missing"),
        })?;

    let byterange = match attributes.get("BYTERANGE") {
        Some(x) => Some(parse_byte_range(x).ok_or(ParseError::InvalidFormat {
            line,
            tag: directives::MAP,
            detail: Some("invalid BYTERANGE"),
        })?),
        None => None,
    };

    Ok(SegmentMap { uri, byterange })
}

/// Walks the lines following `#EXTM3U`. Each [`Interpreter::step`] consumes
/// the state and hands it back, so a whole document is a `try_fold`.
#[derive(Debug)]
pub struct Interpreter {
    playlist: M3uPlaylist,
    pending: PendingSegment,
    key: Option<SegmentKey>,
    map: Option<SegmentMap>,
}

impl Interpreter {
    pub fn new(attributes: HashMap<SmolStr, SmolStr>) -> Self {
        Self {
            playlist: M3uPlaylist {
                kind: PlaylistKind::Extended,
                attributes,
                ..Default::default()
            },
            pending: PendingSegment::default(),
            key: None,
            map: None,
        }
    }

    pub fn step(mut self, line: &Line<'_>) -> Result<Self, ParseError> {
        match Directive::parse(line)? {
            Some(directive) => self.apply_directive(directive, line.number)?,
            None if line.is_comment() => {}
            None => self.push_location(line)?,
        }

        Ok(self)
    }

    pub fn finish(self) -> Result<M3uPlaylist, ParseError> {
        if !self.pending.is_blank() {
            return Err(ParseError::UnterminatedSegment {
                line: self.pending.opened_at,
            });
        }

        if self.pending.has_directives() {
            trace!("Discarding segment directives after the last location");
        }

        debug!(
            "Parsed extended playlist with {} segments",
            self.playlist.segments.len()
        );
        Ok(self.playlist)
    }

    fn apply_directive(&mut self, directive: Directive<'_>, line: usize) -> Result<(), ParseError> {
        match directive {
            Directive::Inf(value) => self.apply_media_info(value, line)?,
            Directive::Version(value) => {
                if self.playlist.version.is_some() {
                    return Err(ParseError::DuplicateTag {
                        line,
                        tag: directives::VERSION,
                    });
                }
                self.playlist.version = Some(parse_value(value, line, directives::VERSION)?);
            }
            Directive::TargetDuration(value) => {
                if self.playlist.target_duration.is_some() {
                    return Err(ParseError::DuplicateTag {
                        line,
                        tag: directives::TARGETDURATION,
                    });
                }
                self.playlist.target_duration =
                    Some(parse_value(value, line, directives::TARGETDURATION)?);
            }
            Directive::MediaSequence(value) => {
                if self.playlist.media_sequence.is_some() {
                    return Err(ParseError::DuplicateTag {
                        line,
                        tag: directives::MEDIA_SEQUENCE,
                    });
                }
                self.playlist.media_sequence =
                    Some(parse_value(value, line, directives::MEDIA_SEQUENCE)?);
            }
            Directive::PlaylistType(value) => {
                if self.playlist.playlist_type.is_some() {
                    return Err(ParseError::DuplicateTag {
                        line,
                        tag: directives::PLAYLIST_TYPE,
                    });
                }
                self.playlist.playlist_type = Some(match value {
                    "EVENT" => PlaylistType::Event,
                    "VOD" => PlaylistType::Vod,
                    _ => {
                        return Err(ParseError::InvalidFormat {
                            line,
                            tag: directives::PLAYLIST_TYPE,
                            detail: None,
                        });
                    }
                });
            }
            Directive::EndList => self.playlist.end_list = true,
            Directive::IndependentSegments => self.playlist.independent_segments = true,
            Directive::ByteRange(value) => {
                self.pending.byte_range =
                    Some(parse_byte_range(value).ok_or(ParseError::InvalidFormat {
                        line,
                        tag: directives::BYTERANGE,
                        detail: None,
                    })?);
            }
            Directive::Discontinuity => self.pending.discontinuity = true,
            Directive::Key(value) => self.key = parse_key(value, line)?,
            Directive::Map(value) => self.map = Some(parse_map(value, line)?),
            Directive::ProgramDateTime(value) => {
                self.pending.program_date_time = Some(value.into());
            }
            Directive::DateRange(value) => {
                self.pending.date_range = Some(parse_attribute_list(value));
            }
            Directive::Unknown { name, value } => {
                trace!("Unknown tag {} at line {}", name, line);
                self.pending.unknown_tags.insert(name.into(), value.into());
            }
        }

        Ok(())
    }

    /// `#EXTINF:<duration>[ attr="value"...],<title>`
    fn apply_media_info(&mut self, value: &str, line: usize) -> Result<(), ParseError> {
        let invalid = |detail: &'static str| ParseError::InvalidFormat {
            line,
            tag: directives::EXTINF,
            detail: Some(detail),
        };

        let comma = value
            .rfind(',')
            .ok_or_else(|| invalid("unable to parse title"))?;
        let duration = DURATION_REGEX
            .find(value)
            .ok_or_else(|| invalid("unable to parse duration"))?;

        self.pending.duration = Some(
            duration
                .as_str()
                .parse()
                .map_err(|_| invalid("unable to parse duration"))?,
        );
        self.pending.title = Some(value[comma + 1..].trim().into());
        self.pending
            .attributes
            .extend(parse_attributes(&value[duration.end()..comma]));
        self.pending.opened_at = line;

        Ok(())
    }

    fn push_location(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        if self.pending.title.is_none() {
            return Err(ParseError::UnexpectedLocation { line: line.number });
        }

        let segment = take(&mut self.pending).into_segment(
            line.text.into(),
            self.key.clone(),
            self.map.clone(),
        );
        self.playlist.segments.push(segment);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn run(lines: &[&str]) -> Result<M3uPlaylist, ParseError> {
        lines
            .iter()
            .enumerate()
            .map(|(index, text)| Line {
                number: index + 2,
                text: *text,
            })
            .try_fold(Interpreter::new(HashMap::new()), |state, line| {
                state.step(&line)
            })?
            .finish()
    }

    #[test]
    fn test_single_segment() {
        let result = run(&["#EXTINF:123,Sample artist - Sample title", "Sample.mp3"]).unwrap();
        assert_eq!(result.kind, PlaylistKind::Extended);
        assert_eq!(result.segments.len(), 1);

        let segment = &result.segments[0];
        assert_eq!(segment.file, "Sample.mp3");
        assert_eq!(segment.title.as_deref(), Some("Sample artist - Sample title"));
        assert_eq!(segment.duration, Some(123));
        assert!(segment.attributes.is_empty());
        assert!(segment.unknown_tags.is_empty());
        assert_eq!(segment.byte_range, None);
        assert_eq!(segment.key, None);
        assert_eq!(segment.map, None);
    }

    #[test]
    fn test_media_info_attributes() {
        let result = run(&[
            r#"#EXTINF:-1 tvg-id="test_id_1" tvg-name="Some Stream" channel-id="1",Some Interesting Stream"#,
            "http://example.org/livestream.mp4",
        ])
        .unwrap();
        let segment = &result.segments[0];
        assert_eq!(segment.duration, Some(-1));
        assert_eq!(segment.title.as_deref(), Some("Some Interesting Stream"));
        assert_eq!(segment.attributes.len(), 3);
        assert_eq!(segment.attributes["tvg-name"], "Some Stream");
    }

    #[test]
    fn test_media_info_bare_attributes_skipped() {
        let result = run(&["#EXTINF:-1 tvg-id=abc junk=x,Title", "a.ts"]).unwrap();
        let segment = &result.segments[0];
        assert!(segment.attributes.is_empty());
        assert_eq!(segment.title.as_deref(), Some("Title"));

        let result = run(&[r#"#EXTINF:1 a="xyz,T"#, "b.ts"]).unwrap();
        assert!(result.segments[0].attributes.is_empty());
        assert_eq!(result.segments[0].title.as_deref(), Some("T"));
    }

    #[test]
    fn test_fractional_duration_truncated() {
        let result = run(&["#EXTINF:6.00000000,", "21-35-08882.ts"]).unwrap();
        let segment = &result.segments[0];
        assert_eq!(segment.duration, Some(6));
        assert_eq!(segment.title.as_deref(), Some(""));
        assert!(segment.attributes.is_empty());
    }

    #[test]
    fn test_media_info_errors() {
        let error = run(&["#EXTINF:123 Missing comma", "a.mp3"]).unwrap_err();
        assert!(error.to_string().contains("unable to parse title"));
        assert_eq!(error.line(), Some(2));

        let error = run(&["#EXTINF:abc,Title", "a.mp3"]).unwrap_err();
        assert!(error.to_string().contains("unable to parse duration"));
        assert_eq!(error.kind(), ErrorKind::TagSyntax);
    }

    #[test]
    fn test_location_without_media_info() {
        let error = run(&["#EXTINF:1,A", "a.mp3", "b.mp3"]).unwrap_err();
        assert!(matches!(error, ParseError::UnexpectedLocation { line: 4 }));
        assert_eq!(error.kind(), ErrorKind::Sequencing);
    }

    #[test]
    fn test_dangling_media_info() {
        let error = run(&["#EXTINF:1,A", "a.mp3", "#EXTINF:2,B"]).unwrap_err();
        assert!(matches!(error, ParseError::UnterminatedSegment { line: 4 }));
        assert_eq!(error.kind(), ErrorKind::Truncated);
    }

    #[test]
    fn test_trailing_segment_directives_dropped() {
        let result = run(&[
            "#EXTINF:1,A",
            "a.mp3",
            "#EXTGRP:late",
            "#EXT-X-DISCONTINUITY",
        ])
        .unwrap();
        assert_eq!(result.segments.len(), 1);
        assert!(result.segments[0].unknown_tags.is_empty());
        assert!(!result.segments[0].discontinuity);
    }

    #[test]
    fn test_version_once() {
        let result = run(&["#EXT-X-VERSION:3"]).unwrap();
        assert_eq!(result.version, Some(3));
        assert!(result.segments.is_empty());

        let result = run(&["#EXT-X-VERSION:-1"]).unwrap();
        assert_eq!(result.version, Some(-1));

        let error = run(&["#EXT-X-VERSION:-1", "#EXT-X-VERSION:-1"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Sequencing);

        let error = run(&["#EXT-X-VERSION:3", "#EXT-X-VERSION:4"]).unwrap_err();
        assert!(matches!(error, ParseError::DuplicateTag { line: 3, .. }));
        assert!(error.to_string().contains("EXT-X-VERSION"));

        let error = run(&["#EXT-X-VERSION:shit"]).unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("Invalid format of #EXT-X-VERSION")
        );
    }

    #[test]
    fn test_byte_range() {
        let result = run(&[
            "#EXTINF:0,Some Stream",
            "#EXT-X-BYTERANGE:100@222",
            "http://example.com/stream.mp4",
            "#EXTINF:1233,Another stream",
            "#EXT-X-BYTERANGE:33",
            "http://example.com/stream.webm",
            "#EXTINF:1,Third",
            "http://example.com/stream.ogg",
        ])
        .unwrap();
        assert_eq!(
            result.segments[0].byte_range,
            Some(ByteRange {
                length: 100,
                offset: Some(222)
            })
        );
        assert_eq!(
            result.segments[1].byte_range,
            Some(ByteRange {
                length: 33,
                offset: None
            })
        );
        assert_eq!(result.segments[2].byte_range, None);

        let error = run(&["#EXTINF:0,S", "#EXT-X-BYTERANGE:wow@222", "file.mp4"]).unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("Invalid format of #EXT-X-BYTERANGE")
        );
    }

    #[test]
    fn test_key_carried_forward() {
        let result = run(&[
            r#"#EXT-X-KEY:METHOD=AES-128,URI="https://priv.example.com/key.php?r=52""#,
            "#EXTINF:2,",
            "a.ts",
            "#EXTINF:2,",
            "b.ts",
            r#"#EXT-X-KEY:METHOD=AES-128,URI="https://priv.example.com/key.php?r=53",IV=0x1234,KEYFORMAT="identity",KEYFORMATVERSIONS="1""#,
            "#EXTINF:2,",
            "c.ts",
            "#EXT-X-KEY:METHOD=NONE",
            "#EXTINF:2,",
            "d.ts",
        ])
        .unwrap();
        let first = SegmentKey {
            method: "AES-128".into(),
            uri: Some("https://priv.example.com/key.php?r=52".into()),
            iv: None,
            keyformat: None,
            keyformat_versions: None,
        };
        assert_eq!(result.segments[0].key.as_ref(), Some(&first));
        assert_eq!(result.segments[1].key.as_ref(), Some(&first));

        let third = result.segments[2].key.as_ref().unwrap();
        assert_eq!(third.uri.as_deref(), Some("https://priv.example.com/key.php?r=53"));
        assert_eq!(third.iv.as_deref(), Some("0x1234"));
        assert_eq!(third.keyformat.as_deref(), Some("identity"));
        assert_eq!(third.keyformat_versions.as_deref(), Some("1"));

        assert_eq!(result.segments[3].key, None);
    }

    #[test]
    fn test_key_and_map_apply_to_open_segment() {
        let result = run(&[
            "#EXTINF:2,First",
            "a.ts",
            "#EXTINF:2,Second",
            r#"#EXT-X-KEY:METHOD=AES-128,URI="k1""#,
            r#"#EXT-X-MAP:URI="init.mp4""#,
            "b.ts",
            "#EXTINF:2,Third",
            "c.ts",
        ])
        .unwrap();
        assert_eq!(result.segments[0].key, None);
        assert_eq!(result.segments[0].map, None);

        for segment in &result.segments[1..] {
            let key = segment.key.as_ref().unwrap();
            assert_eq!(key.method, "AES-128");
            assert_eq!(key.uri.as_deref(), Some("k1"));
            assert_eq!(segment.map.as_ref().unwrap().uri, "init.mp4");
        }
    }

    #[test]
    fn test_key_requires_method() {
        let error = run(&[r#"#EXT-X-KEY:URI="k""#]).unwrap_err();
        assert!(error.to_string().contains("METHOD is missing"));
    }

    #[test]
    fn test_map_carried_forward() {
        let result = run(&[
            r#"#EXT-X-MAP:URI="main.mp4",BYTERANGE="560@0""#,
            "#EXTINF:10,",
            "a.mp4",
            "#EXTINF:10,",
            "b.mp4",
            r#"#EXT-X-MAP:URI="other.mp4""#,
            "#EXTINF:10,",
            "c.mp4",
        ])
        .unwrap();
        let first = SegmentMap {
            uri: "main.mp4".into(),
            byterange: Some(ByteRange {
                length: 560,
                offset: Some(0),
            }),
        };
        assert_eq!(result.segments[0].map.as_ref(), Some(&first));
        assert_eq!(result.segments[1].map.as_ref(), Some(&first));
        assert_eq!(
            result.segments[2].map,
            Some(SegmentMap {
                uri: "other.mp4".into(),
                byterange: None
            })
        );
    }

    #[test]
    fn test_map_errors() {
        let error = run(&[r#"#EXT-X-MAP:BYTERANGE="1@0""#]).unwrap_err();
        assert!(error.to_string().contains("URI is missing"));

        let error = run(&[r#"#EXT-X-MAP:URI="a.mp4",BYTERANGE="x""#]).unwrap_err();
        assert!(error.to_string().contains("invalid BYTERANGE"));
    }

    #[test]
    fn test_unknown_tags_on_open_segment() {
        let result = run(&[
            "#EXTINF:123,Sample artist - Sample title",
            "#EXTGRP:Test group",
            "Sample.mp3",
        ])
        .unwrap();
        assert_eq!(result.segments[0].unknown_tags.len(), 1);
        assert_eq!(result.segments[0].unknown_tags["#EXTGRP"], "Test group");
    }

    #[test]
    fn test_segment_boundary_directives() {
        let result = run(&[
            "#EXTINF:4,",
            "a.ts",
            "#EXT-X-DISCONTINUITY",
            "#EXT-X-PROGRAM-DATE-TIME:2010-02-19T14:54:23.031+08:00",
            r#"#EXT-X-DATERANGE:ID="splice-6FFFFFF0",START-DATE="2014-03-05T11:15:00Z",PLANNED-DURATION=59.993"#,
            "#EXTINF:4,",
            "b.ts",
        ])
        .unwrap();
        assert!(!result.segments[0].discontinuity);

        let segment = &result.segments[1];
        assert!(segment.discontinuity);
        assert_eq!(
            segment.program_date_time.as_deref(),
            Some("2010-02-19T14:54:23.031+08:00")
        );
        let date_range = segment.date_range.as_ref().unwrap();
        assert_eq!(date_range["ID"], "splice-6FFFFFF0");
        assert_eq!(date_range["PLANNED-DURATION"], "59.993");
    }

    #[test]
    fn test_playlist_scoped_tags() {
        let result = run(&[
            "#EXT-X-TARGETDURATION:10",
            "#EXT-X-MEDIA-SEQUENCE:2680",
            "#EXT-X-PLAYLIST-TYPE:VOD",
            "#EXT-X-INDEPENDENT-SEGMENTS",
            "#EXTINF:10,",
            "a.ts",
            "#EXT-X-ENDLIST",
        ])
        .unwrap();
        assert_eq!(result.target_duration, Some(10));
        assert_eq!(result.media_sequence, Some(2680));
        assert_eq!(result.playlist_type, Some(PlaylistType::Vod));
        assert!(result.independent_segments);
        assert!(result.end_list);

        let error = run(&["#EXT-X-TARGETDURATION:10", "#EXT-X-TARGETDURATION:10"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Sequencing);

        let error = run(&["#EXT-X-PLAYLIST-TYPE:LIVE"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::TagSyntax);
    }

    #[test]
    fn test_missing_tag_value() {
        let error = run(&["#EXTINF"]).unwrap_err();
        assert!(
            error
                .to_string()
                .starts_with("#EXTINF tag used but no data provided")
        );
    }
}
