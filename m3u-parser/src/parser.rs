use std::io::Read;

use log::debug;

use crate::{
    ParseError,
    format::{M3uPlaylist, M3uSegment, PlaylistKind},
    header::{Header, classify_header},
    interpreter::Interpreter,
    lines::{Line, normalize_lines},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reject documents whose first line is a comment other than `#EXTM3U`
    /// instead of reading them as simple playlists
    pub strict: bool,
}

/// Parser for simple and extended m3u playlists.
///
/// A parser holds only its options, so one instance can be shared and
/// reused for any number of documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn parse(&self, input: &str) -> Result<M3uPlaylist, ParseError> {
        let lines = normalize_lines(input);

        match classify_header(lines.first(), self.options.strict)? {
            Header::Empty => Ok(M3uPlaylist::default()),
            Header::Simple { skip_first } => {
                debug!("No #EXTM3U marker, reading as a simple playlist");
                Ok(parse_simple(&lines[usize::from(skip_first)..]))
            }
            Header::Extended { attributes } => lines[1..]
                .iter()
                .try_fold(Interpreter::new(attributes), |state, line| state.step(line))?
                .finish(),
        }
    }

    /// Decodes `input` as UTF-8 before parsing.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<M3uPlaylist, ParseError> {
        self.parse(std::str::from_utf8(input)?)
    }

    pub fn parse_reader(&self, mut reader: impl Read) -> Result<M3uPlaylist, ParseError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        self.parse_bytes(&buffer)
    }
}

fn parse_simple(lines: &[Line<'_>]) -> M3uPlaylist {
    M3uPlaylist {
        kind: PlaylistKind::Simple,
        segments: lines
            .iter()
            .filter(|x| !x.is_comment())
            .map(|x| M3uSegment::from_file(x.text))
            .collect(),
        ..Default::default()
    }
}

/// Parses `input` with default options.
pub fn parse(input: &str) -> Result<M3uPlaylist, ParseError> {
    Parser::new().parse(input)
}
