use std::collections::HashMap;

use smol_str::SmolStr;

use crate::{ParseError, attributes::parse_attributes, format::directives, lines::Line};

#[derive(Debug, PartialEq)]
pub enum Header {
    /// Nothing but blank lines
    Empty,
    /// No `#EXTM3U` marker; `skip_first` is set when the first line is a comment
    Simple { skip_first: bool },
    /// Attributes trailing the marker
    Extended {
        attributes: HashMap<SmolStr, SmolStr>,
    },
}

fn marker_attributes(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(directives::EXTM3U)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

pub fn classify_header(first_line: Option<&Line<'_>>, strict: bool) -> Result<Header, ParseError> {
    let Some(first_line) = first_line else {
        return Ok(Header::Empty);
    };

    if let Some(attributes) = marker_attributes(first_line.text) {
        return Ok(Header::Extended {
            attributes: parse_attributes(attributes),
        });
    }

    if first_line.is_comment() {
        if strict {
            return Err(ParseError::UnsupportedFormat {
                line: first_line.number,
            });
        }

        return Ok(Header::Simple { skip_first: true });
    }

    Ok(Header::Simple { skip_first: false })
}
