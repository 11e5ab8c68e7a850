use std::borrow::Cow;
use std::fmt::Display;

use crate::object::ObjectKind;
use crate::{Error, Result};

/// The mode of a tree entry, kept as the exact ASCII digits it was read with.
///
/// Git writes directories as `40000` (five digits) and everything else with six; both forms must
/// be reproduced byte-for-byte to keep tree digests stable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMode(Cow<'static, str>);

impl FileMode {
    pub const DIRECTORY: FileMode = FileMode(Cow::Borrowed("40000"));
    pub const REGULAR: FileMode = FileMode(Cow::Borrowed("100644"));
    pub const EXECUTABLE: FileMode = FileMode(Cow::Borrowed("100755"));
    pub const SYMLINK: FileMode = FileMode(Cow::Borrowed("120000"));
    pub const GITLINK: FileMode = FileMode(Cow::Borrowed("160000"));

    /// Accepts 5 or 6 ASCII digits.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if !(5..=6).contains(&bytes.len()) || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        let text = std::str::from_utf8(bytes).ok()?;
        Some(Self(Cow::Owned(text.to_owned())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The mode left-padded to six digits, as `ls-tree` shows it.
    pub fn padded(&self) -> String {
        format!("{:0>6}", self.0)
    }

    /// The kind of object an entry with this mode points to.
    pub fn kind(&self) -> Result<ObjectKind> {
        match &self.padded()[..2] {
            "04" => Ok(ObjectKind::Tree),
            "10" | "12" => Ok(ObjectKind::Blob),
            "16" => Ok(ObjectKind::Commit),
            _ => Err(Error::UnknownTreeMode(self.0.to_string())),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.padded().starts_with("04")
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.padded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let cases = [
            ("40000", ObjectKind::Tree),
            ("040000", ObjectKind::Tree),
            ("100644", ObjectKind::Blob),
            ("100755", ObjectKind::Blob),
            ("120000", ObjectKind::Blob),
            ("160000", ObjectKind::Commit),
        ];
        for (mode, kind) in cases {
            let mode = FileMode::parse(mode.as_bytes()).unwrap();
            assert_eq!(mode.kind().unwrap(), kind, "{mode}");
        }

        let weird = FileMode::parse(b"777777").unwrap();
        assert!(matches!(weird.kind(), Err(Error::UnknownTreeMode(m)) if m == "777777"));
    }

    #[test]
    fn test_parse() {
        assert_eq!(FileMode::parse(b"40000"), Some(FileMode::DIRECTORY));
        assert_eq!(FileMode::parse(b"100644"), Some(FileMode::REGULAR));
        assert_eq!(FileMode::parse(b"4000"), None);
        assert_eq!(FileMode::parse(b"1006440"), None);
        assert_eq!(FileMode::parse(b"10064a"), None);
    }

    #[test]
    fn test_padded() {
        assert_eq!(FileMode::DIRECTORY.padded(), "040000");
        assert_eq!(FileMode::DIRECTORY.as_str(), "40000");
        assert_eq!(FileMode::REGULAR.to_string(), "100644");
    }
}
