use std::{fmt::Display, io, path::Path};

use m3u_parser::{ParseError, Parser, ParserOptions, format::M3uPlaylist};
use std::error::Error;
use tokio::task::JoinError;

#[derive(Debug)]
pub enum LoadError {
    IoError(io::Error),
    ParseError(ParseError),
    JoinError(JoinError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => e.fmt(f),
            Self::JoinError(e) => e.fmt(f),
            Self::ParseError(e) => e.fmt(f),
        }
    }
}

impl Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

impl From<JoinError> for LoadError {
    fn from(value: JoinError) -> Self {
        Self::JoinError(value)
    }
}

impl From<ParseError> for LoadError {
    fn from(value: ParseError) -> Self {
        Self::ParseError(value)
    }
}

/// Runs the parser on the blocking pool so large documents do not stall the runtime.
pub async fn parse_playlist_async(
    data: Vec<u8>,
    options: ParserOptions,
) -> Result<M3uPlaylist, LoadError> {
    Ok(
        tokio::task::spawn_blocking(move || Parser::with_options(options).parse_bytes(&data))
            .await??,
    )
}

pub async fn load_playlist(
    path: impl AsRef<Path>,
    options: ParserOptions,
) -> Result<M3uPlaylist, LoadError> {
    let data = tokio::fs::read(path.as_ref()).await?;
    parse_playlist_async(data, options).await
}
