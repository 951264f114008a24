use serde::{Deserialize, Deserializer};

/// One field of a partial update.
///
/// Deserialized together with `#[serde(default)]` on the containing struct:
/// a key missing from the JSON object stays `Absent`, `null` becomes `Null`
/// and anything else becomes `Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchField<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> PatchField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}
