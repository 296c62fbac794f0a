//! Accepted request payload shapes.

/// Per-field constraint checked on keys that are present.
#[derive(Clone, Copy, Debug)]
pub enum FieldRule {
    NotNull,
    /// JSON integer (or null unless `NotNull` is also set).
    Integer,
    /// String value from a fixed set.
    OneOf(&'static [&'static str]),
}

/// Key set for one operation. Create requests must carry every `required` key and nothing outside
/// `required` and `optional`; update requests keep the recognized keys and drop the rest.
#[derive(Clone, Copy, Debug)]
pub struct PayloadSchema {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub rules: &'static [(&'static str, FieldRule)],
}

impl PayloadSchema {
    pub fn accepts(&self, key: &str) -> bool {
        self.required.contains(&key) || self.optional.contains(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.required.iter().chain(self.optional.iter()).copied()
    }
}
