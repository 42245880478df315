//! Raw column payloads.
//!
//! A payload is what actually sits in the column: either text carrying an
//! encoding label, or raw bytes. Two payloads with identical bytes but
//! different tags are *not* equal; columns that store bytes normalize with
//! [`Payload::into_binary`] before comparing.

/// Encoding label carried by text payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// 7-bit ASCII. The data is still a valid Rust string.
    UsAscii,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::UsAscii => "US-ASCII",
        }
    }
}

/// A raw value as stored in (or read from) a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Text with an encoding label.
    Text { data: String, encoding: TextEncoding },
    /// Raw bytes with no text encoding.
    Binary(Vec<u8>),
}

impl Payload {
    /// Creates a UTF-8 text payload.
    pub fn text(data: impl Into<String>) -> Self {
        Payload::Text {
            data: data.into(),
            encoding: TextEncoding::Utf8,
        }
    }

    /// Creates a text payload with an explicit encoding label.
    pub fn text_with_encoding(data: impl Into<String>, encoding: TextEncoding) -> Self {
        Payload::Text {
            data: data.into(),
            encoding,
        }
    }

    /// Creates a binary payload.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Payload::Binary(bytes.into())
    }

    /// Returns the payload content as bytes, ignoring the tag.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text { data, .. } => data.as_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    /// Returns the content as a string if it is text or UTF-8 bytes.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::Text { data, .. } => Some(data),
            Payload::Binary(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }

    /// Returns the number of content bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Returns true if the payload has no content bytes.
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Returns true if the payload is empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        self.as_bytes().iter().all(u8::is_ascii_whitespace)
    }

    /// Returns true for binary payloads.
    pub fn is_binary(&self) -> bool {
        matches!(self, Payload::Binary(_))
    }

    /// Returns the encoding label of a text payload.
    pub fn encoding(&self) -> Option<TextEncoding> {
        match self {
            Payload::Text { encoding, .. } => Some(*encoding),
            Payload::Binary(_) => None,
        }
    }

    /// Returns true if both payloads hold the same bytes, whatever their tags.
    pub fn content_eq(&self, other: &Payload) -> bool {
        self.as_bytes() == other.as_bytes()
    }

    /// Converts into the canonical binary form.
    ///
    /// Text payloads give up their buffer; no bytes are copied.
    pub fn into_binary(self) -> Payload {
        match self {
            Payload::Text { data, .. } => Payload::Binary(data.into_bytes()),
            binary => binary,
        }
    }

    /// Returns the canonical binary form in a new buffer, leaving `self` untouched.
    pub fn to_binary(&self) -> Payload {
        Payload::Binary(self.as_bytes().to_vec())
    }

    /// Converts into UTF-8 text, returning the original payload if the bytes
    /// are not valid UTF-8.
    pub fn into_text(self) -> Result<Payload, Payload> {
        match self {
            text @ Payload::Text { .. } => Ok(text),
            Payload::Binary(bytes) => match String::from_utf8(bytes) {
                Ok(data) => Ok(Payload::text(data)),
                Err(e) => Err(Payload::Binary(e.into_bytes())),
            },
        }
    }

    /// Consumes the payload and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text { data, .. } => data.into_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::text(s)
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::text(s)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Binary(bytes.to_vec())
    }
}
