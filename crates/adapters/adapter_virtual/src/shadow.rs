//! Button cloud-shadow document parsing.
//!
//! The button's device shadow nests its press timestamps under
//! `metadata.reported."11".properties`. The "up" side is reported as
//! `ep2:sButtonS:ButtonPressed` and the "down" side as
//! `ep3:sButtonS:ButtonPressed`, each with a `timestamp` in Unix seconds.

use heathub_domain::button::ButtonEdgePair;
use heathub_domain::error::DataShapeError;
use heathub_domain::time::{Timestamp, from_unix_seconds};
use serde_json::{Map, Value, json};

/// Shadow property holding the last "up" press.
pub const UP_PROPERTY: &str = "ep2:sButtonS:ButtonPressed";
/// Shadow property holding the last "down" press.
pub const DOWN_PROPERTY: &str = "ep3:sButtonS:ButtonPressed";

const PROPERTIES_PATH: [&str; 4] = ["metadata", "reported", "11", "properties"];

/// Extract the button edges from a shadow document.
///
/// A missing edge property (or one without a `timestamp`) yields an absent
/// edge.
///
/// # Errors
///
/// Returns [`DataShapeError::MissingField`] when the properties object is
/// missing, [`DataShapeError::WrongType`] when a level is not an object or a
/// timestamp is not an integer, and [`DataShapeError::TimestampOutOfRange`]
/// for unrepresentable timestamps.
pub fn parse_edges(document: &Value) -> Result<ButtonEdgePair, DataShapeError> {
    let properties = properties(document)?;
    Ok(ButtonEdgePair {
        up_pressed_at: edge(properties, UP_PROPERTY)?,
        down_pressed_at: edge(properties, DOWN_PROPERTY)?,
    })
}

/// Build a shadow document reporting the given press times (Unix seconds).
#[must_use]
pub fn document(up: Option<i64>, down: Option<i64>) -> Value {
    let mut properties = Map::new();
    if let Some(secs) = up {
        properties.insert(UP_PROPERTY.to_string(), json!({ "timestamp": secs }));
    }
    if let Some(secs) = down {
        properties.insert(DOWN_PROPERTY.to_string(), json!({ "timestamp": secs }));
    }
    json!({ "metadata": { "reported": { "11": { "properties": properties } } } })
}

fn properties(document: &Value) -> Result<&Map<String, Value>, DataShapeError> {
    let mut current = document;
    let mut path = String::new();
    for segment in PROPERTIES_PATH {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(segment);
        let object = current.as_object().ok_or_else(|| DataShapeError::WrongType {
            field: parent(&path).to_string(),
            expected: "an object",
        })?;
        current = object
            .get(segment)
            .ok_or_else(|| DataShapeError::MissingField(path.clone()))?;
    }
    current.as_object().ok_or(DataShapeError::WrongType {
        field: path,
        expected: "an object",
    })
}

fn parent(path: &str) -> &str {
    path.rsplit_once('.').map_or("$", |(head, _)| head)
}

fn edge(properties: &Map<String, Value>, name: &str) -> Result<Option<Timestamp>, DataShapeError> {
    let Some(timestamp) = properties.get(name).and_then(|p| p.get("timestamp")) else {
        return Ok(None);
    };
    let secs = timestamp.as_i64().ok_or_else(|| DataShapeError::WrongType {
        field: format!("{name}.timestamp"),
        expected: "an integer number of seconds",
    })?;
    from_unix_seconds(secs).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_both_edges() {
        let edges = parse_edges(&document(Some(1_700_000_600), Some(1_700_000_000))).unwrap();
        assert_eq!(edges.up_pressed_at, Some(from_unix_seconds(1_700_000_600).unwrap()));
        assert_eq!(
            edges.down_pressed_at,
            Some(from_unix_seconds(1_700_000_000).unwrap())
        );
    }

    #[test]
    fn should_treat_missing_edge_as_absent() {
        let edges = parse_edges(&document(Some(1_700_000_600), None)).unwrap();
        assert!(edges.up_pressed_at.is_some());
        assert!(edges.down_pressed_at.is_none());

        let edges = parse_edges(&document(None, None)).unwrap();
        assert_eq!(edges, ButtonEdgePair::default());
    }

    #[test]
    fn should_treat_edge_without_timestamp_as_absent() {
        let doc = json!({ "metadata": { "reported": { "11": { "properties": {
            UP_PROPERTY: { "value": 1 }
        } } } } });
        assert_eq!(parse_edges(&doc).unwrap(), ButtonEdgePair::default());
    }

    #[test]
    fn should_fail_when_properties_missing() {
        let doc = json!({ "metadata": { "reported": { "11": {} } } });
        assert_eq!(
            parse_edges(&doc),
            Err(DataShapeError::MissingField(
                "metadata.reported.11.properties".to_string()
            ))
        );

        assert_eq!(
            parse_edges(&json!({})),
            Err(DataShapeError::MissingField("metadata".to_string()))
        );
    }

    #[test]
    fn should_fail_when_level_is_not_an_object() {
        let doc = json!({ "metadata": { "reported": [] } });
        assert_eq!(
            parse_edges(&doc),
            Err(DataShapeError::WrongType {
                field: "metadata.reported".to_string(),
                expected: "an object",
            })
        );
    }

    #[test]
    fn should_fail_when_timestamp_is_not_an_integer() {
        let doc = json!({ "metadata": { "reported": { "11": { "properties": {
            DOWN_PROPERTY: { "timestamp": "yesterday" }
        } } } } });
        assert!(matches!(
            parse_edges(&doc),
            Err(DataShapeError::WrongType { .. })
        ));
    }
}
