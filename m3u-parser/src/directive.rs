use lazy_static::lazy_static;
use regex::Regex;

use crate::{ParseError, format::ByteRange, format::directives, lines::Line};

lazy_static! {
    static ref BYTERANGE_REGEX: Regex =
        Regex::new(r"^([0-9]+)(?:@([0-9]+))?$").expect("Regular expression error");
}

/// A directive line split into its tag and raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Inf(&'a str),
    Version(&'a str),
    ByteRange(&'a str),
    Discontinuity,
    Key(&'a str),
    Map(&'a str),
    ProgramDateTime(&'a str),
    DateRange(&'a str),
    TargetDuration(&'a str),
    MediaSequence(&'a str),
    PlaylistType(&'a str),
    EndList,
    IndependentSegments,
    Unknown { name: &'a str, value: &'a str },
}

impl<'a> Directive<'a> {
    /// Returns `None` for lines that are not `#EXT` directives.
    pub fn parse(line: &Line<'a>) -> Result<Option<Self>, ParseError> {
        let text = line.text;
        if !text.starts_with(directives::EXT) {
            return Ok(None);
        }

        let Some(colon) = text[directives::EXT.len()..]
            .find(':')
            .map(|x| x + directives::EXT.len())
        else {
            // HLS tags that never carry a value may omit the colon; every
            // other tag without one is rejected
            return match text {
                directives::DISCONTINUITY => Ok(Some(Self::Discontinuity)),
                directives::ENDLIST => Ok(Some(Self::EndList)),
                directives::INDEPENDENT_SEGMENTS => Ok(Some(Self::IndependentSegments)),
                _ => Err(ParseError::MissingTagValue {
                    line: line.number,
                    tag: text.into(),
                }),
            };
        };

        let name = &text[..colon];
        let value = text[colon + 1..].trim();

        let directive = match name {
            directives::EXTINF => Self::Inf(value),
            directives::VERSION => Self::Version(value),
            directives::BYTERANGE => Self::ByteRange(value),
            directives::DISCONTINUITY => Self::Discontinuity,
            directives::KEY => Self::Key(value),
            directives::MAP => Self::Map(value),
            directives::PROGRAM_DATE_TIME => Self::ProgramDateTime(value),
            directives::DATERANGE => Self::DateRange(value),
            directives::TARGETDURATION => Self::TargetDuration(value),
            directives::MEDIA_SEQUENCE => Self::MediaSequence(value),
            directives::PLAYLIST_TYPE => Self::PlaylistType(value),
            directives::ENDLIST => Self::EndList,
            directives::INDEPENDENT_SEGMENTS => Self::IndependentSegments,
            _ => Self::Unknown { name, value },
        };

        Ok(Some(directive))
    }
}

/// Parses `<length>[@<offset>]`
pub fn parse_byte_range(value: &str) -> Option<ByteRange> {
    let captures = BYTERANGE_REGEX.captures(value)?;
    let length = captures.get(1)?.as_str().parse().ok()?;
    let offset = match captures.get(2) {
        Some(x) => Some(x.as_str().parse().ok()?),
        None => None,
    };

    Some(ByteRange { length, offset })
}
