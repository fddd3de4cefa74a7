//! Per-call translation options.

use crate::entry::Gender;
use serde::Serialize;
use serde_json::{Map, Value};

/// Interpolation data handed to the [`Interpolator`](crate::Interpolator).
///
/// The resolution engine never looks inside; it only checks whether data
/// was supplied at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Data(Map<String, Value>);

impl Data {
    pub fn new() -> Self {
        Data(Map::new())
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use variant_i18n::Data;
    ///
    /// let data = Data::new().with("Name", "Ada").with("Count", 3);
    /// assert_eq!(data.get("Count"), Some(&serde_json::json!(3)));
    /// ```
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_owned(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Build data from any serializable struct or map.
    ///
    /// Values that do not serialize to an object (numbers, lists...) give
    /// empty data, so every placeholder renders empty.
    pub fn from_serialize<T: Serialize>(value: &T) -> serde_json::Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Data(map)),
            _ => Ok(Data::new()),
        }
    }
}

impl From<Map<String, Value>> for Data {
    fn from(map: Map<String, Value>) -> Self {
        Data(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Data
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Data(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// Runtime options of a single translation.
///
/// `count` selects a plural variant, `gender` a gender variant, and `data`
/// turns on interpolation. Each is independently present or absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub count: Option<i64>,
    /// Raw gender input, kept as given. See [`Options::gender_category`].
    pub gender: Option<String>,
    pub data: Option<Data>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_owned());
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data = Some(data);
        self
    }

    /// Normalized gender.
    ///
    /// Both "no gender given" and "unrecognized gender given" are `None`
    /// here; only the resolution mode still tells them apart.
    pub fn gender_category(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Recipient {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Unread")]
        unread: u32,
    }

    #[test]
    fn test_data_from_struct() {
        let data = Data::from_serialize(&Recipient {
            name: "Ada".to_string(),
            unread: 4,
        })
        .unwrap();
        assert_eq!(data.get("Name"), Some(&json!("Ada")));
        assert_eq!(data.get("Unread"), Some(&json!(4)));
    }

    #[test]
    fn test_data_from_non_object_is_empty() {
        assert!(Data::from_serialize(&42).unwrap().is_empty());
    }

    #[test]
    fn test_data_from_pairs() {
        let data: Data = vec![("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get("B"), Some(&json!("2")));
    }

    #[test]
    fn test_gender_category_merges_absent_and_invalid() {
        assert_eq!(Options::new().gender_category(), None);
        assert_eq!(Options::new().with_gender("robot").gender_category(), None);
        assert_eq!(
            Options::new().with_gender("Male").gender_category(),
            Some(Gender::Male)
        );
    }
}
