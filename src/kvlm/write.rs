use bstr::ByteSlice;

use super::Kvlm;

impl Kvlm {
    /// Serialize back to bytes, re-folding embedded newlines in values.
    ///
    /// For any input `b` accepted by [`Kvlm::parse`] whose repeated keys are contiguous,
    /// `Kvlm::parse(b)?.serialize() == b`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, values) in &self.headers {
            for value in values {
                out.extend_from_slice(key);
                out.push(b' ');
                out.extend_from_slice(&value.replace(b"\n", b"\n "));
                out.push(b'\n');
            }
        }
        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }
}

#[cfg(test)]
mod tests {
    use bstr::ByteSlice;
    use pretty_assertions::assert_eq;

    use crate::kvlm::Kvlm;
    use crate::Result;

    #[test]
    fn test_round_trip() -> Result<()> {
        let inputs: [&[u8]; 6] = [
            crate::kvlm::tests::SIGNED_MERGE.as_bytes(),
            b"tree abc\n\n",
            b"\n",
            b"object abc\ntype commit\ntag v1\ntagger a <b> 1 +0000\n\nrelease\n",
            b"k a\n  indented\n \n tail\n\nm\n\n\n",
            b"parent a\nparent b\nparent c\n\n",
        ];
        for input in inputs {
            let kvlm = Kvlm::parse(input)?;
            assert_eq!(kvlm.serialize().as_bstr(), input.as_bstr());
        }
        Ok(())
    }

    #[test]
    fn test_folds_multiline_values() {
        let mut kvlm = Kvlm::new();
        kvlm.push("key", "line one\nline two\n\nline four");
        kvlm.set_message("msg\n");
        assert_eq!(
            kvlm.serialize().as_bstr(),
            "key line one\n line two\n \n line four\n\nmsg\n".as_bytes().as_bstr()
        );
    }
}
