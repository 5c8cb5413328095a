//! Explicit text encoding for stored migration scripts.
//!
//! The ledger keeps the original `sql_up` / `sql_down` text as bytes in the
//! configured encoding. The encoding is threaded through ledger construction
//! as a [`ScriptEncoding`] value rather than read from global state.

use crate::error::{CoreError, CoreResult};
use encoding_rs::Encoding;
use std::fmt;

/// A text encoding resolved from a WHATWG label such as `"utf-8"`,
/// `"latin1"` or `"windows-1252"`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ScriptEncoding(&'static Encoding);

impl ScriptEncoding {
    /// UTF-8, the default script encoding.
    pub fn utf8() -> Self {
        Self(encoding_rs::UTF_8)
    }

    /// Resolve an encoding label (case-insensitive, surrounding whitespace ignored).
    ///
    /// Encodings that cannot be produced as output (UTF-16, replacement) are
    /// mapped to the encoding `encoding_rs` would write instead, so bytes
    /// produced by [`encode`](Self::encode) always round-trip through
    /// [`decode`](Self::decode).
    pub fn for_label(label: &str) -> CoreResult<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|enc| Self(enc.output_encoding()))
            .ok_or_else(|| CoreError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Encode `text`, failing if any character is not representable.
    pub fn encode(&self, text: &str) -> CoreResult<Vec<u8>> {
        let (bytes, _, had_errors) = self.0.encode(text);
        if had_errors {
            return Err(CoreError::Unencodable {
                encoding: self.name(),
            });
        }
        Ok(bytes.into_owned())
    }

    /// Decode `bytes`, replacing malformed sequences with U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, had_errors) = self.0.decode_without_bom_handling(bytes);
        if had_errors {
            log::warn!(
                "Stored script is not valid {}; malformed bytes were replaced",
                self.name()
            );
        }
        text.into_owned()
    }
}

impl Default for ScriptEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for ScriptEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScriptEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for ScriptEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
