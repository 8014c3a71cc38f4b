use serde::{Deserialize, Deserializer};

/// Treats empty or whitespace-only strings as `None`.
///
/// Query strings like `?search=` arrive as `Some("")`; filters should ignore them.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

/// Accepts either a JSON array of strings or a comma separated string.
///
/// Entries are trimmed and blanks dropped.
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<ListOrCsv> = Option::deserialize(deserializer)?;
    let items = match raw {
        None => return Ok(None),
        Some(ListOrCsv::List(items)) => items,
        Some(ListOrCsv::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
    };
    Ok(Some(
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Query {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        search: Option<String>,
    }

    #[derive(Deserialize)]
    struct Medical {
        #[serde(default, deserialize_with = "deserialize_string_list")]
        allergies: Option<Vec<String>>,
    }

    #[test]
    fn test_empty_string_is_none() {
        let q: Query = serde_json::from_str(r#"{"search":"  "}"#).unwrap();
        assert!(q.search.is_none());
    }

    #[test]
    fn test_missing_is_none() {
        let q: Query = serde_json::from_str("{}").unwrap();
        assert!(q.search.is_none());
    }

    #[test]
    fn test_value_is_trimmed() {
        let q: Query = serde_json::from_str(r#"{"search":" polio "}"#).unwrap();
        assert_eq!(q.search.as_deref(), Some("polio"));
    }

    #[test]
    fn test_list_from_array() {
        let m: Medical = serde_json::from_str(r#"{"allergies":["peanuts"," dust "]}"#).unwrap();
        assert_eq!(m.allergies, Some(vec!["peanuts".to_string(), "dust".to_string()]));
    }

    #[test]
    fn test_list_from_csv() {
        let m: Medical = serde_json::from_str(r#"{"allergies":"peanuts, dust,,"}"#).unwrap();
        assert_eq!(m.allergies, Some(vec!["peanuts".to_string(), "dust".to_string()]));
    }

    #[test]
    fn test_list_missing() {
        let m: Medical = serde_json::from_str("{}").unwrap();
        assert!(m.allergies.is_none());
    }
}
