//! Token stream shared by the `-`-separated encodings

use crate::encoding::Encoding;
use crate::error::CodecError;

pub(crate) const SEPARATOR: char = '-';

/// Cursor over the `-`-separated tokens of an encoded reference
pub(crate) struct Tokens<'a> {
    encoding: Encoding,
    items: Vec<&'a str>,
    index: usize,
}

impl<'a> Tokens<'a> {
    /// Split `input` and consume the leading encoding token
    pub(crate) fn open(encoding: Encoding, input: &'a str) -> Result<Self, CodecError> {
        let mut tokens = Self {
            encoding,
            items: input.split(SEPARATOR).collect(),
            index: 0,
        };
        let header = tokens.next("encoding token")?;
        let mut chars = header.chars();
        if chars.next() != Some(encoding.token()) || chars.next().is_some() {
            return Err(CodecError::unexpected(encoding, 0, "encoding token", header));
        }
        Ok(tokens)
    }

    /// Index of the next token
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.index
    }

    pub(crate) fn next(&mut self, expected: &'static str) -> Result<&'a str, CodecError> {
        let token = self
            .items
            .get(self.index)
            .copied()
            .ok_or(CodecError::UnexpectedEnd {
                encoding: self.encoding,
                expected,
            })?;
        self.index += 1;
        Ok(token)
    }

    /// Parameter count token
    pub(crate) fn next_count(&mut self) -> Result<usize, CodecError> {
        let position = self.index;
        let token = self.next("parameter count")?;
        let valid = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
        let count = if valid { token.parse::<usize>().ok() } else { None };
        match count {
            // every parameter takes at least one token
            Some(count) if count <= self.items.len() - self.index => Ok(count),
            _ => Err(CodecError::unexpected(self.encoding, position, "parameter count", token)),
        }
    }

    /// Fail unless every token was consumed
    pub(crate) fn finish(&self) -> Result<(), CodecError> {
        if self.index == self.items.len() {
            Ok(())
        } else {
            Err(CodecError::TrailingInput {
                encoding: self.encoding,
                position: self.index,
            })
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str, found: &str) -> CodecError {
        CodecError::unexpected(self.encoding, self.index.saturating_sub(1), expected, found)
    }
}

/// Join tokens into an encoded reference string
pub(crate) fn join(tokens: &[String]) -> String {
    tokens.join(&SEPARATOR.to_string())
}
