//! Decoding of the alert feed body.

use incident_core::Alert;
use serde::Deserialize;

use crate::error::OrefError;

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Single(Alert),
    Many(Vec<Alert>),
}

/// Parse a feed body into alerts.
///
/// Byte-order marks are stripped. A body that is then empty or whitespace
/// means "no alerts"; otherwise it must be one alert object or an array.
pub fn parse_alerts(body: &str) -> Result<Vec<Alert>, OrefError> {
    let cleaned: String = body.chars().filter(|c| *c != BYTE_ORDER_MARK).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Payload>(cleaned) {
        Ok(Payload::Single(alert)) => Ok(vec![alert]),
        Ok(Payload::Many(alerts)) => Ok(alerts),
        Err(e) => Err(OrefError::Parse {
            body: body.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_bodies() {
        assert!(parse_alerts("").unwrap().is_empty());
        assert!(parse_alerts("\r\n").unwrap().is_empty());
        assert!(parse_alerts("\u{feff}\r\n ").unwrap().is_empty());
    }

    #[test]
    fn test_single_object() {
        let body = "\u{feff}{\"id\":\"1\",\"cat\":\"1\",\"title\":\"ירי רקטות וטילים\",\"data\":[\"שדרות\"],\"desc\":\"היכנסו למרחב המוגן\"}";
        let alerts = parse_alerts(body).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].locations, vec!["שדרות"]);
    }

    #[test]
    fn test_array() {
        let body = r#"[{"id":"1","data":["a"]},{"id":"2","data":["b","c"]}]"#;
        let alerts = parse_alerts(body).unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[1].id, "2");
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_alerts("[]").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = parse_alerts("<html>blocked</html>").unwrap_err();
        match err {
            OrefError::Parse { body, .. } => assert!(body.contains("blocked")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
