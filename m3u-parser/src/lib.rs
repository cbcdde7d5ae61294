//! # m3u-parser
//! A library for parsing simple and extended (HLS) m3u playlists
//!
//! # Example
//! ```rust
//! use m3u_parser::Parser;
//!
//! let result = Parser::new()
//!     .strict(true)
//!     .parse(r#"
//! #EXTM3U x-tvg-url="test"
//! #EXT-X-VERSION:3
//! #EXTINF:1 tvg-id="a" provider-type="iptv",A
//! http://example.com/A.m3u8"#)
//!     .unwrap();
//!
//! assert_eq!(result.version, Some(3));
//! assert_eq!(result.segments[0].title.as_deref(), Some("A"));
//! assert_eq!(result.segments[0].attributes["tvg-id"], "a");
//! ```

mod attributes;
mod directive;
mod errors;
pub mod format;
mod header;
mod interpreter;
mod lines;
mod parser;
pub use attributes::{parse_attribute_list, parse_attributes};
pub use errors::*;
pub use parser::*;
