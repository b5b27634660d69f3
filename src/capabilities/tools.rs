// Small stateless helpers handed to route modules

use chrono::Utc;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Tools;

impl Tools {
    pub fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Current UTC time as RFC 3339
    pub fn now(&self) -> String {
        Utc::now().to_rfc3339()
    }

    /*
        * Convert any `Serialize` type into a two-space-indented JSON string.
    */
    pub fn pretty_json<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        let mut writer: Vec<u8> = Vec::new();

        let formatter: PrettyFormatter<'_> = PrettyFormatter::with_indent(b"  ");

        let mut ser: Serializer<&mut Vec<u8>, PrettyFormatter<'_>> =
            Serializer::with_formatter(&mut writer, formatter);

        value.serialize(&mut ser)?;

        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&writer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_json_uses_two_spaces() {
        let out: String = Tools.pretty_json(&json!({ "a": 1 })).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(Tools.new_id(), Tools.new_id());
    }
}
