use std::fmt::Display;

use chrono::{DateTime, FixedOffset, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub DateTime<FixedOffset>);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::offset::Local::now().into())
    }

    /// Seconds since the epoch plus a UTC offset in minutes.
    pub fn from_unix(unix: i64, offset_minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_minutes.checked_mul(60)?)?;
        offset.timestamp_opt(unix, 0).single().map(Self)
    }

    /// Parse a timestamp from a unix + HH + mm offset, e.g. `1658312219 +0100`.
    pub fn from_git(s: &str) -> Option<Self> {
        let (unix, offset) = s.split_once(' ')?;
        let unix = unix.parse().ok()?;
        if offset.len() != 5
            || !offset.is_ascii()
            || !offset[1..].bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let sign = match &offset[..1] {
            "+" => 1,
            "-" => -1,
            _ => return None,
        };
        let hours: i32 = offset[1..3].parse().ok()?;
        let minutes: i32 = offset[3..].parse().ok()?;
        Self::from_unix(unix, sign * (hours * 60 + minutes))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0.timestamp(), self.0.format("%z"))
    }
}

/// The identity line used by `author`, `committer` and `tagger` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
    pub when: Timestamp,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>, when: Timestamp) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }

    /// Parse a signature header value.
    ///
    /// ## Example
    /// `Jamie Quigley <jamie@quigley.xyz> 1658312219 +0100`
    pub fn parse(value: &str) -> Option<Self> {
        static REGEX: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(.*) <([^<>]*)> (\d+ [+-]\d{4})$").unwrap());

        let groups = REGEX.captures(value)?;
        Some(Self {
            name: groups[1].to_owned(),
            email: groups[2].to_owned(),
            when: Timestamp::from_git(&groups[3])?,
        })
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {}", self.name, self.email, self.when)
    }
}
