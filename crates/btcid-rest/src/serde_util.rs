//! Custom serde helpers for the exchange's loose wire formats.

/// Deserializes a JSON string or number into a `String`.
///
/// The API is not consistent about quoting ids, prices and timestamps.
pub mod string_or_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s,
            Repr::Number(n) => n.to_string(),
        })
    }
}

/// Deserializes `null` as the type's default value.
pub mod null_as_default {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::null_as_default::deserialize")]
        name: String,
    }

    #[test]
    fn test_string_or_number() {
        let a: Sample = serde_json::from_str(r#"{"id": 42, "name": "x"}"#).unwrap();
        let b: Sample = serde_json::from_str(r#"{"id": "42", "name": "x"}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn test_null_as_default() {
        let s: Sample = serde_json::from_str(r#"{"id": "1", "name": null}"#).unwrap();
        assert_eq!(s.name, "");

        let s: Sample = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert_eq!(s.name, "");
    }
}
