//! fOS HTML Parser
//!
//! HTML5 parser built on html5ever, producing `fos_dom::Document`s.

mod parser;

pub use fos_dom::Document;
pub use parser::{HtmlParser, ParserConfig};

/// Parse an HTML string with the default configuration
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
