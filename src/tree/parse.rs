use nom::bytes::complete::{tag, take, take_till1, take_while_m_n};
use nom::combinator::map_opt;
use nom::sequence::terminated;
use nom::IResult;

use crate::digest::{Digest, DIGEST_LEN};
use crate::filemode::FileMode;
use crate::{Error, Result};

use super::TreeEntry;

impl super::Tree {
    /// Parse the payload of a tree object. Entries keep their on-disk order.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut entries = Vec::new();
        let mut input = bytes;

        while !input.is_empty() {
            let offset = bytes.len() - input.len();
            let (rest, entry) = parse_entry(input).map_err(|_| {
                Error::MalformedTree(format!("invalid entry at byte offset {offset}"))
            })?;
            entries.push(entry);
            input = rest;
        }

        Ok(Self { entries })
    }
}

/// Parses one entry of the form `<mode> <name>\0<oid>`, where `<oid>` is 20 raw bytes.
fn parse_entry(input: &[u8]) -> IResult<&[u8], TreeEntry> {
    let mode_digits = take_while_m_n(5, 6, |b: u8| b.is_ascii_digit());
    let (input, mode) = terminated(map_opt(mode_digits, FileMode::parse), tag(" "))(input)?;
    let (input, name) = terminated(take_till1(|b: u8| b == b'\0' || b == b'/'), tag("\0"))(input)?;
    let (input, oid) = map_opt(take(DIGEST_LEN), Digest::from_slice)(input)?;

    Ok((
        input,
        TreeEntry {
            mode,
            name: name.into(),
            oid,
        },
    ))
}
