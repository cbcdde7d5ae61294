use std::{error::Error, fmt::Display, io, str::Utf8Error};

use smol_str::SmolStr;

/// Broad category of a [`ParseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input is not text
    InputType,
    /// Reading the input failed
    Io,
    /// Unsupported header line
    Header,
    /// A directive value does not follow its grammar
    TagSyntax,
    /// A directive or location appears where it is not allowed
    Sequencing,
    /// Input ended in the middle of a segment
    Truncated,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputType => write!(f, "Input type error"),
            Self::Io => write!(f, "I/O error"),
            Self::Header => write!(f, "Header error"),
            Self::TagSyntax => write!(f, "Tag syntax error"),
            Self::Sequencing => write!(f, "Sequencing error"),
            Self::Truncated => write!(f, "Truncated playlist"),
        }
    }
}

/// Line numbers are 1-based and count blank lines of the source.
#[derive(Debug)]
pub enum ParseError {
    InvalidEncoding(Utf8Error),
    IoError(io::Error),
    /// First line looks like a directive but is not `#EXTM3U` (strict mode)
    UnsupportedFormat { line: usize },
    /// `#EXT...` tag without `:` that requires a value
    MissingTagValue { line: usize, tag: SmolStr },
    InvalidFormat {
        line: usize,
        tag: &'static str,
        detail: Option<&'static str>,
    },
    /// Playlist-scoped directive repeated
    DuplicateTag { line: usize, tag: &'static str },
    /// Location without a preceding `#EXTINF`
    UnexpectedLocation { line: usize },
    /// `#EXTINF` never followed by a location
    UnterminatedSegment { line: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEncoding(_) => ErrorKind::InputType,
            Self::IoError(_) => ErrorKind::Io,
            Self::UnsupportedFormat { .. } => ErrorKind::Header,
            Self::MissingTagValue { .. } | Self::InvalidFormat { .. } => ErrorKind::TagSyntax,
            Self::DuplicateTag { .. } | Self::UnexpectedLocation { .. } => ErrorKind::Sequencing,
            Self::UnterminatedSegment { .. } => ErrorKind::Truncated,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidEncoding(_) | Self::IoError(_) => None,
            Self::UnsupportedFormat { line }
            | Self::MissingTagValue { line, .. }
            | Self::InvalidFormat { line, .. }
            | Self::DuplicateTag { line, .. }
            | Self::UnexpectedLocation { line }
            | Self::UnterminatedSegment { line } => Some(*line),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEncoding(e) => {
                write!(f, "Data passed to the parser should be text: {}", e)
            }
            Self::IoError(e) => e.fmt(f),
            Self::UnsupportedFormat { line } => write!(
                f,
                "Unsupported playlist format at line {}: extended playlist must start with #EXTM3U",
                line
            ),
            Self::MissingTagValue { line, tag } => {
                write!(f, "{} tag used but no data provided at line {}", tag, line)
            }
            Self::InvalidFormat { line, tag, detail } => {
                write!(f, "Invalid format of {}", tag)?;
                if let Some(detail) = detail {
                    write!(f, " - {}", detail)?;
                }
                write!(f, " at line {}", line)
            }
            Self::DuplicateTag { line, tag } => write!(
                f,
                "{} tag must appear only once in the playlist, repeated at line {}",
                tag.trim_start_matches('#'),
                line
            ),
            Self::UnexpectedLocation { line } => write!(
                f,
                "Invalid data at line {}: location without a preceding #EXTINF",
                line
            ),
            Self::UnterminatedSegment { line } => write!(
                f,
                "Invalid playlist: segment started at line {} has no location",
                line
            ),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(e) => Some(e),
            Self::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

impl From<Utf8Error> for ParseError {
    fn from(value: Utf8Error) -> Self {
        Self::InvalidEncoding(value)
    }
}
