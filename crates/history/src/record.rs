//! Revision record data structures

use crate::HistoryError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

/// A revision is a stored historical snapshot of a parent content item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRecord {
    /// Numeric identifier; secondary sort key among equal timestamps
    pub id: u64,
    /// Owning content item, recovered from the name field
    pub parent_id: u64,
    /// Revision flavor encoded in the name field
    pub kind: RevisionKind,
    /// Point in time used for ordering and calendar bucketing, in the
    /// time zone the input was exported in (no conversion applied)
    pub timestamp: NaiveDateTime,
    /// The full original row, kept for verbose echo output
    pub fields: Vec<String>,
}

/// Revision flavor encoded in the name field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionKind {
    /// A saved revision
    Revision,
    /// An editor autosave
    Autosave,
}

/// Parsed form of a revision row's name field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName {
    pub parent_id: u64,
    pub kind: RevisionKind,
}

/// Parse a name of the form `<parentId>-(revision|autosave)-v1`
///
/// Returns `None` for anything else; mixed content types are expected in
/// the input and are not an error.
pub fn parse_name(name: &str) -> Option<ParsedName> {
    let (prefix, rest) = name.split_once('-')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let parent_id = prefix.parse().ok()?;
    let kind = match rest {
        "revision-v1" => RevisionKind::Revision,
        "autosave-v1" => RevisionKind::Autosave,
        _ => return None,
    };
    Some(ParsedName { parent_id, kind })
}

/// Parse a timestamp string
///
/// Accepts `yyyy-mm-dd HH:MM:SS`, `yyyy-mm-ddTHH:MM:SS`, and bare
/// `yyyy-mm-dd` (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

impl RevisionRecord {
    /// Build a record from a raw row: index 0 = id, 1 = name, 2 = timestamp.
    ///
    /// Returns `Ok(None)` for rows that are not revision rows (too short,
    /// or name does not match the pattern). Rows that match the pattern
    /// but carry a malformed id or timestamp are errors.
    pub fn from_row(fields: Vec<String>) -> Result<Option<Self>, HistoryError> {
        if fields.len() < 3 {
            debug!("skipping short row {:?}", fields);
            return Ok(None);
        }
        let Some(parsed) = parse_name(&fields[1]) else {
            debug!("skipping non-revision row {:?}", fields[1]);
            return Ok(None);
        };
        let id = fields[0]
            .trim()
            .parse()
            .map_err(|_| HistoryError::InvalidId {
                value: fields[0].clone(),
                name: fields[1].clone(),
            })?;
        let timestamp =
            parse_timestamp(&fields[2]).ok_or_else(|| HistoryError::InvalidTimestamp {
                id,
                value: fields[2].clone(),
            })?;
        Ok(Some(Self {
            id,
            parent_id: parsed.parent_id,
            kind: parsed.kind,
            timestamp,
            fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        let parsed = parse_name("42-revision-v1").unwrap();
        assert_eq!(parsed.parent_id, 42);
        assert_eq!(parsed.kind, RevisionKind::Revision);

        let parsed = parse_name("7-autosave-v1").unwrap();
        assert_eq!(parsed.parent_id, 7);
        assert_eq!(parsed.kind, RevisionKind::Autosave);

        assert!(parse_name("garbage").is_none());
        assert!(parse_name("x42-revision-v1").is_none());
        assert!(parse_name("-revision-v1").is_none());
        assert!(parse_name("42-revision-v2").is_none());
        assert!(parse_name("42-revision").is_none());
        assert!(parse_name("42-draft-v1").is_none());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let full = parse_timestamp("2015-11-01 12:30:45").unwrap();
        assert_eq!(full.to_string(), "2015-11-01 12:30:45");

        let iso = parse_timestamp("2015-11-01T12:30:45").unwrap();
        assert_eq!(iso, full);

        let midnight = parse_timestamp("2015-11-01").unwrap();
        assert_eq!(midnight.to_string(), "2015-11-01 00:00:00");

        assert!(parse_timestamp("last tuesday").is_none());
        assert!(parse_timestamp("2015-13-01").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_from_row() {
        let row = vec![
            "100".to_string(),
            "42-revision-v1".to_string(),
            "2015-11-01 12:00:00".to_string(),
        ];
        let record = RevisionRecord::from_row(row).unwrap().unwrap();
        assert_eq!(record.id, 100);
        assert_eq!(record.parent_id, 42);
        assert_eq!(record.fields.len(), 3);
    }

    #[test]
    fn test_from_row_skips_non_revisions() {
        let row = vec![
            "100".to_string(),
            "hello-world".to_string(),
            "2015-11-01 12:00:00".to_string(),
        ];
        assert!(RevisionRecord::from_row(row).unwrap().is_none());

        let short = vec!["100".to_string(), "42-revision-v1".to_string()];
        assert!(RevisionRecord::from_row(short).unwrap().is_none());
    }

    #[test]
    fn test_from_row_rejects_bad_fields() {
        let bad_ts = vec![
            "100".to_string(),
            "42-revision-v1".to_string(),
            "not a date".to_string(),
        ];
        assert!(matches!(
            RevisionRecord::from_row(bad_ts),
            Err(HistoryError::InvalidTimestamp { id: 100, .. })
        ));

        let bad_id = vec![
            "abc".to_string(),
            "42-revision-v1".to_string(),
            "2015-11-01 12:00:00".to_string(),
        ];
        assert!(matches!(
            RevisionRecord::from_row(bad_id),
            Err(HistoryError::InvalidId { .. })
        ));
    }
}
