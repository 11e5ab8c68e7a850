use bstr::ByteSlice;
use memchr::memchr;

use crate::{Error, Result};

use super::Kvlm;

impl Kvlm {
    /// Parse a KVLM payload.
    ///
    /// The header section ends at the first blank line; everything after it, byte for byte, is the
    /// message. A header line followed by lines starting with a space is one folded value.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut kvlm = Kvlm::new();
        let mut rest = bytes;

        loop {
            match rest.first() {
                None => {
                    return Err(Error::MalformedKvlm(
                        "no blank line between headers and message".into(),
                    ))
                }
                Some(b'\n') => {
                    kvlm.message = rest[1..].into();
                    return Ok(kvlm);
                }
                Some(_) => {}
            }

            let line_end = memchr(b'\n', rest)
                .ok_or_else(|| Error::MalformedKvlm("unterminated header line".into()))?;
            let space = memchr(b' ', &rest[..line_end]).ok_or_else(|| {
                Error::MalformedKvlm(format!(
                    "header line without a value: {:?}",
                    rest[..line_end].as_bstr()
                ))
            })?;
            if space == 0 {
                return Err(Error::MalformedKvlm(format!(
                    "header line without a key: {:?}",
                    rest[..line_end].as_bstr()
                )));
            }

            // swallow continuation lines
            let mut end = line_end;
            while rest.get(end + 1) == Some(&b' ') {
                let next = memchr(b'\n', &rest[end + 1..]).ok_or_else(|| {
                    Error::MalformedKvlm("unterminated continuation line".into())
                })?;
                end += 1 + next;
            }

            let key = &rest[..space];
            let value = rest[space + 1..end].replace(b"\n ", b"\n");
            kvlm.push(key, value);

            rest = &rest[end + 1..];
        }
    }
}
