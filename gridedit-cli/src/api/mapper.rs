//! Normalizes heterogeneous remote records into the fixed row shape.
//!
//! Every branch has a fallback, so mapping never fails for well-formed JSON
//! input. The result is a pure function of (record, index, now); the caller
//! captures `now` once per fetch cycle.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use super::models::{REGIONS, Record, Status};

/// Extraction strategy: one way of pulling a candidate value out of a raw
/// record. Strategies run in priority order until one yields a non-empty
/// result.
type Extractor = fn(&Value) -> Option<String>;

/// Map one raw remote record at its positional index in the fetch response.
pub fn map_record(raw: &Value, index: usize, now: DateTime<Utc>) -> Record {
    let created = now - Duration::days((index % 365) as i64);

    Record {
        id: extract_id(raw).unwrap_or_else(|| index.to_string()),
        name: extract_name(raw).unwrap_or_else(|| format!("User {}", index)),
        // Passed through verbatim; the remote shape spells it either way.
        bio: string_field(raw, "bio")
            .or_else(|| string_field(raw, "about"))
            .unwrap_or_default(),
        language: extract_language(raw).unwrap_or_default(),
        region: REGIONS[index % REGIONS.len()].to_string(),
        created_at: created.format("%Y-%m-%d %H:%M:%S").to_string(),
        status: Status::ALL[index % Status::ALL.len()],
        is_new: false,
    }
}

fn extract_id(raw: &Value) -> Option<String> {
    first_non_empty(
        raw,
        &[
            |r| string_field(r, "guid"),
            |r| string_field(r, "id"),
            |r| string_field(r, "_id"),
        ],
    )
}

fn extract_name(raw: &Value) -> Option<String> {
    first_non_empty(
        raw,
        &[
            |r| string_field(r, "name"),
            structured_name,
            |r| string_field(r, "username"),
            |r| string_field(r, "email"),
        ],
    )
}

fn extract_language(raw: &Value) -> Option<String> {
    // The remote dataset has no language field; the first non-empty of these
    // unrelated fields stands in for it.
    first_non_empty(
        raw,
        &[
            |r| string_field(r, "company"),
            |r| string_field(r, "eyeColor"),
            |r| string_field(r, "favoriteFruit"),
        ],
    )
}

fn first_non_empty(raw: &Value, extractors: &[Extractor]) -> Option<String> {
    extractors.iter().find_map(|extract| {
        extract(raw)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// A field that is a string, or a number rendered as one. Objects and other
/// shapes yield nothing so the chain can fall through.
fn string_field(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A structured name object ({first, last}) joined with a single space.
fn structured_name(raw: &Value) -> Option<String> {
    let name = raw.get("name")?;
    let first = name.get("first").and_then(Value::as_str).unwrap_or("");
    let last = name.get("last").and_then(Value::as_str).unwrap_or("");
    let joined = format!("{} {}", first, last).trim().to_string();
    if joined.is_empty() { None } else { Some(joined) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_mapping_is_pure() {
        let raw = json!({"guid": "g-1", "name": "Ada", "company": "Initech"});
        let a = map_record(&raw, 7, fixed_now());
        let b = map_record(&raw, 7, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_identifier_selection_order() {
        let now = fixed_now();
        let all = json!({"guid": "g", "id": "i", "_id": "u"});
        assert_eq!(map_record(&all, 0, now).id, "g");
        let no_guid = json!({"id": "i", "_id": "u"});
        assert_eq!(map_record(&no_guid, 0, now).id, "i");
        let alt_only = json!({"_id": "u"});
        assert_eq!(map_record(&alt_only, 0, now).id, "u");
        let none = json!({});
        assert_eq!(map_record(&none, 12, now).id, "12");
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let raw = json!({"id": 42});
        assert_eq!(map_record(&raw, 0, fixed_now()).id, "42");
    }

    #[test]
    fn test_name_fallback_chain() {
        let now = fixed_now();
        let plain = json!({"name": "Ada Lovelace"});
        assert_eq!(map_record(&plain, 0, now).name, "Ada Lovelace");

        let structured = json!({"name": {"first": "Ada", "last": "Lovelace"}});
        assert_eq!(map_record(&structured, 0, now).name, "Ada Lovelace");

        let first_only = json!({"name": {"first": "Ada"}});
        assert_eq!(map_record(&first_only, 0, now).name, "Ada");

        let username = json!({"username": "ada42"});
        assert_eq!(map_record(&username, 0, now).name, "ada42");

        let email = json!({"email": "ada@example.com"});
        assert_eq!(map_record(&email, 0, now).name, "ada@example.com");

        let nothing = json!({});
        assert_eq!(map_record(&nothing, 5, now).name, "User 5");
    }

    #[test]
    fn test_language_stand_in_chain() {
        let now = fixed_now();
        let company = json!({"company": "Initech", "eyeColor": "blue"});
        assert_eq!(map_record(&company, 0, now).language, "Initech");

        let eye = json!({"company": "", "eyeColor": "blue", "favoriteFruit": "apple"});
        assert_eq!(map_record(&eye, 0, now).language, "blue");

        let fruit = json!({"favoriteFruit": "apple"});
        assert_eq!(map_record(&fruit, 0, now).language, "apple");

        assert_eq!(map_record(&json!({}), 0, now).language, "");
    }

    #[test]
    fn test_bio_passes_through() {
        let now = fixed_now();
        assert_eq!(map_record(&json!({"bio": " hi "}), 0, now).bio, " hi ");
        assert_eq!(map_record(&json!({"about": "text"}), 0, now).bio, "text");
        assert_eq!(map_record(&json!({}), 0, now).bio, "");
    }

    #[test]
    fn test_region_and_status_cycle_by_index() {
        let now = fixed_now();
        let raw = json!({});
        assert_eq!(map_record(&raw, 0, now).region, "US");
        assert_eq!(map_record(&raw, 9, now).region, "AU");
        assert_eq!(map_record(&raw, 10, now).region, "US");

        assert_eq!(map_record(&raw, 0, now).status, Status::Active);
        assert_eq!(map_record(&raw, 3, now).status, Status::Suspended);
        assert_eq!(map_record(&raw, 4, now).status, Status::Active);
    }

    #[test]
    fn test_created_at_format_and_offset() {
        let raw = json!({});
        // index 3 -> now minus 3 days, second precision, no timezone suffix
        assert_eq!(
            map_record(&raw, 3, fixed_now()).created_at,
            "2024-05-07 12:30:45"
        );
        // offset wraps at 365 days
        assert_eq!(
            map_record(&raw, 365, fixed_now()).created_at,
            "2024-05-10 12:30:45"
        );
    }
}
