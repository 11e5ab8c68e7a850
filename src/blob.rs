use crate::object::ObjectKind;
use crate::storable::Storable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Storable for Blob {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Blob
    }

    fn serialize(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }
}
