//! Serde adapters for the on-disk JSON conventions.

/// 64-bit integers encoded as decimal strings.
///
/// Deserialization also accepts bare JSON numbers.
pub mod string_int {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Str(String),
        Signed(i64),
        Unsigned(u64),
    }

    /// Serialize as a decimal string.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserialize from a decimal string or a number.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s,
            Repr::Signed(n) => n.to_string(),
            Repr::Unsigned(n) => n.to_string(),
        };
        text.trim().parse().map_err(serde::de::Error::custom)
    }
}

/// Byte strings encoded as upper-case hex; empty string for no bytes.
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as upper-case hex.
    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_upper(bytes))
    }

    /// Deserialize from hex; `null` decodes to no bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text: Option<String> = Option::deserialize(deserializer)?;
        match text {
            None => Ok(Vec::new()),
            Some(s) => hex::decode(s).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::string_int")]
        height: i64,
        #[serde(with = "super::hex_bytes")]
        hash: Vec<u8>,
    }

    #[test]
    fn test_encodes_as_strings() {
        let sample = Sample {
            height: -1,
            hash: vec![0xab, 0x01],
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"height":"-1","hash":"AB01"}"#);
        assert_eq!(serde_json::from_str::<Sample>(&json).unwrap(), sample);
    }

    #[test]
    fn test_accepts_bare_numbers() {
        let parsed: Sample = serde_json::from_str(r#"{"height":42,"hash":""}"#).unwrap();
        assert_eq!(parsed.height, 42);
        assert!(parsed.hash.is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"height":"4x","hash":""}"#).is_err());
    }
}
