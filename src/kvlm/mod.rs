//! Key-Value List with Message: the header-lines-plus-free-text format shared by commit and tag
//! payloads.
//!
//! ```text
//! tree 090c4c5dd61d2e84c832c4cd306b66bf2fabc1f5
//! parent e6a49274aa0893ce2e2928589100387aee220c5b
//! author Jamie Quigley <jamie@quigley.xyz> 1658312219 +0100
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  <continuation lines start with a single space>
//!  -----END PGP SIGNATURE-----
//!
//! Free text message
//! ```

mod parse;
mod write;

use bstr::{BStr, BString, ByteSlice};

/// An ordered header mapping plus a message.
///
/// Keys keep the order they were first seen in. A repeated key becomes a multi-valued entry.
/// Values are stored unfolded: a continuation line `"\n "` is held as a bare `'\n'`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kvlm {
    headers: Vec<(BString, Vec<BString>)>,
    message: BString,
}

impl Kvlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values recorded for `key`, in order.
    pub fn get(&self, key: &[u8]) -> Option<&[BString]> {
        self.headers
            .iter()
            .find(|(k, _)| k.as_bytes() == key)
            .map(|(_, v)| v.as_slice())
    }

    /// The first value recorded for `key`.
    pub fn first(&self, key: &[u8]) -> Option<&BStr> {
        self.get(key)?.first().map(|v| v.as_bstr())
    }

    /// Append a value for `key`. A key that already exists gains another value.
    pub fn push(&mut self, key: impl Into<BString>, value: impl Into<BString>) {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((key, vec![value])),
        }
    }

    /// Replace every value of `key` with `value`, keeping the key's position.
    pub fn set(&mut self, key: impl Into<BString>, value: impl Into<BString>) {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => *values = vec![value],
            None => self.headers.push((key, vec![value])),
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = (&BStr, &[BString])> {
        self.headers
            .iter()
            .map(|(k, v)| (k.as_bstr(), v.as_slice()))
    }

    pub fn message(&self) -> &BStr {
        self.message.as_bstr()
    }

    pub fn set_message(&mut self, message: impl Into<BString>) {
        self.message = message.into();
    }
}
