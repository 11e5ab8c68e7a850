use crate::object::ObjectKind;
use crate::storable::Storable;

impl Storable for super::Tree {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Tree
    }

    fn serialize(&self) -> Vec<u8> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.canonical_cmp(b));

        let mut data = Vec::new();
        for entry in entries {
            data.extend_from_slice(entry.mode.as_str().as_bytes());
            data.push(b' ');
            data.extend_from_slice(&entry.name);
            data.push(b'\0');
            data.extend_from_slice(&*entry.oid);
        }
        data
    }
}
