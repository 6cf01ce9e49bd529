//! Error types for XML parsing and serialisation.

use thiserror::Error;

/// Errors raised while reading or writing an XML document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The document is not well-formed.
    #[error("Malformed XML at byte {position}: {message}")]
    Parse {
        /// Byte offset where parsing failed.
        position: String,
        /// The parser's description of the failure.
        message: String,
    },

    /// An element name or attribute could not be decoded.
    #[error("Invalid XML attribute: {0}")]
    Attribute(String),

    /// The document contains no root element.
    #[error("XML document has no root element")]
    Empty,

    /// The document contains more than one top-level element.
    #[error("XML document has more than one root element")]
    MultipleRoots,

    /// The element tree could not be serialised.
    #[error("Failed to write XML: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_includes_position() {
        let error = XmlError::Parse {
            position: "42".to_string(),
            message: "unexpected end".to_string(),
        };
        assert_eq!(error.to_string(), "Malformed XML at byte 42: unexpected end");
    }
}
