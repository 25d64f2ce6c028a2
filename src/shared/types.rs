use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Error body shapes the backend produces (`{message}` from controllers,
/// `{error}` from the framework's default error handler)
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}

/// Accepts RFC 3339 timestamps as well as zone-less `LocalDateTime`
/// values (read as UTC). Anything else becomes `None`.
pub fn deserialize_lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let with_zone = parse_timestamp("2025-03-04T08:15:00Z").unwrap();
        let local = parse_timestamp("2025-03-04T08:15:00").unwrap();
        let fractional = parse_timestamp("2025-03-04T08:15:00.123456").unwrap();

        assert_eq!(with_zone, local);
        assert_eq!(fractional.timestamp(), local.timestamp());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"Bloc not found","error":"Bad Request"}"#).unwrap();
        assert_eq!(body.into_message(), Some("Bloc not found".to_string()));

        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"","error":"Bad Request"}"#)
            .unwrap();
        assert_eq!(body.into_message(), Some("Bad Request".to_string()));

        let body: ApiErrorBody = serde_json::from_str(r#"{"status":500}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
