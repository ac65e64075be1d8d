//! Serde helpers for the `YYYY-MM-DD` date fields of the stored document.

/// An optional date stored as `""` when absent.
///
/// Reading accepts `""`, `null` and a missing field (with `#[serde(default)]`)
/// as "no date".
pub mod optional {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.collect_str(&d.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", s, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Holder {
        #[serde(default, with = "super::optional")]
        end: Option<NaiveDate>,
    }

    #[test]
    fn test_none_serializes_as_empty_string() {
        let json = serde_json::to_string(&Holder { end: None }).unwrap();
        assert_eq!(json, r#"{"end":""}"#);
    }

    #[test]
    fn test_some_serializes_as_iso_date() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 9);
        let json = serde_json::to_string(&Holder { end }).unwrap();
        assert_eq!(json, r#"{"end":"2024-03-09"}"#);
    }

    #[test]
    fn test_empty_null_and_missing_read_as_none() {
        for json in [r#"{"end":""}"#, r#"{"end":null}"#, "{}"] {
            let holder: Holder = serde_json::from_str(json).unwrap();
            assert_eq!(holder.end, None, "input: {}", json);
        }
    }

    #[test]
    fn test_garbage_date_is_rejected() {
        let result: Result<Holder, _> = serde_json::from_str(r#"{"end":"next tuesday"}"#);
        assert!(result.is_err());
    }
}
