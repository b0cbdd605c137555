use serde::{Deserialize, Serialize};

/// A persisted bird record. Field names on the wire are Spanish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bird {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "familia")]
    pub family: String,
    #[serde(rename = "hembra")]
    pub is_female: bool,
}

/// The mutable fields of a bird, used both for creation and for full replacement.
///
/// An `id` in the incoming JSON is ignored; ids are owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewBird {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "familia")]
    pub family: String,
    #[serde(rename = "hembra")]
    pub is_female: bool,
}

impl NewBird {
    pub fn new(name: impl Into<String>, family: impl Into<String>, is_female: bool) -> Self {
        NewBird {
            name: name.into(),
            family: family.into(),
            is_female,
        }
    }

    /// Attach an id, producing the full record.
    pub fn with_id(self, id: i64) -> Bird {
        Bird {
            id,
            name: self.name,
            family: self.family,
            is_female: self.is_female,
        }
    }
}
