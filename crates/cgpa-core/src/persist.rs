//! Persisted key-value layout.
//!
//! | Key          | Value                                          |
//! |--------------|------------------------------------------------|
//! | `courseList` | JSON array of `{course, grade, credit, point}` |
//! | `gpa`        | decimal string, `"0"` when absent              |
//! | `cgpa`       | decimal string, `"0"` when absent              |
//!
//! Saves always overwrite all three keys. Loading never fails: anything
//! missing, unreadable, or malformed is treated as absent.

use crate::engine;
use crate::model::{CourseRecord, SessionState};
use crate::traits::KeyValueStore;

pub const COURSE_LIST_KEY: &str = "courseList";
pub const GPA_KEY: &str = "gpa";
pub const CGPA_KEY: &str = "cgpa";

/// Every key a session owns. Clearing removes exactly these.
pub const SESSION_KEYS: [&str; 3] = [COURSE_LIST_KEY, GPA_KEY, CGPA_KEY];

/// Sentinel written for an absent GPA/CGPA.
const ABSENT: &str = "0";

/// The encoded values of one full-overwrite save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub course_list: String,
    pub gpa: String,
    pub cgpa: String,
}

impl Snapshot {
    /// Encode the persisted part of `state`.
    pub fn capture(state: &SessionState) -> Result<Self, serde_json::Error> {
        Ok(Self {
            course_list: serde_json::to_string(state.courses())?,
            gpa: encode_scalar(state.gpa()),
            cgpa: encode_scalar(state.cgpa()),
        })
    }

    /// `(key, value)` pairs in write order.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (COURSE_LIST_KEY, self.course_list.as_str()),
            (GPA_KEY, self.gpa.as_str()),
            (CGPA_KEY, self.cgpa.as_str()),
        ]
    }
}

/// Full-precision decimal form, or the `"0"` sentinel.
pub fn encode_scalar(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => ABSENT.to_string(),
    }
}

/// Inverse of [`encode_scalar`]. The sentinel, malformed text, and
/// non-finite numbers all decode to `None`.
pub fn decode_scalar(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw == ABSENT {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!("ignoring malformed persisted number: {raw:?}");
            None
        }
    }
}

/// Decode a persisted course list.
///
/// Malformed JSON yields an empty list; individual records that break the
/// model invariants are dropped.
pub fn decode_course_list(raw: Option<&str>) -> Vec<CourseRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let records: Vec<CourseRecord> = match serde_json::from_str(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("ignoring malformed persisted course list: {e}");
            return Vec::new();
        }
    };

    let total = records.len();
    let kept: Vec<CourseRecord> = records
        .into_iter()
        .filter(CourseRecord::is_well_formed)
        .collect();
    if kept.len() < total {
        tracing::warn!("dropped {} malformed course record(s)", total - kept.len());
    }
    kept
}

/// Values read back from a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Restored {
    pub courses: Vec<CourseRecord>,
    pub gpa: Option<f64>,
    pub cgpa: Option<f64>,
}

impl Restored {
    /// Rebuild a session state, replaying the engine over the restored
    /// courses. The stored GPA is only used when no course survived.
    ///
    /// Semesters are not part of the layout, so the restored state starts
    /// with an empty semester list and the stored CGPA.
    pub fn into_state(self) -> SessionState {
        let gpa = engine::weighted_gpa(&self.courses).or(self.gpa);
        SessionState {
            grading_system: None,
            courses: self.courses,
            semesters: Vec::new(),
            gpa,
            cgpa: self.cgpa,
        }
    }
}

/// Read the three session keys. Read failures are logged and treated as
/// absent values.
pub async fn load(store: &dyn KeyValueStore) -> Restored {
    let course_list = read_key(store, COURSE_LIST_KEY).await;
    let gpa = read_key(store, GPA_KEY).await;
    let cgpa = read_key(store, CGPA_KEY).await;

    Restored {
        courses: decode_course_list(course_list.as_deref()),
        gpa: decode_scalar(gpa.as_deref()),
        cgpa: decode_scalar(cgpa.as_deref()),
    }
}

async fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to read '{key}' from {} store: {e}", store.name());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, credit: f64, point: f64) -> CourseRecord {
        CourseRecord {
            course_name: name.into(),
            grade_label: "A".into(),
            credit_hours: credit,
            grade_point: point,
        }
    }

    #[test]
    fn scalar_encoding_uses_sentinel_for_absent() {
        assert_eq!(encode_scalar(None), "0");
        assert_eq!(encode_scalar(Some(3.5)), "3.5");
        assert_eq!(decode_scalar(Some("0")), None);
        assert_eq!(decode_scalar(None), None);
        assert_eq!(decode_scalar(Some("3.5")), Some(3.5));
        assert_eq!(decode_scalar(Some("garbage")), None);
        assert_eq!(decode_scalar(Some("NaN")), None);
    }

    #[test]
    fn scalar_keeps_full_precision() {
        let value = 10.0 / 3.0;
        assert_eq!(decode_scalar(Some(&encode_scalar(Some(value)))), Some(value));
    }

    #[test]
    fn malformed_course_list_is_empty() {
        assert!(decode_course_list(Some("{not json")).is_empty());
        assert!(decode_course_list(Some(r#"{"course":"x"}"#)).is_empty());
        assert!(decode_course_list(None).is_empty());
    }

    #[test]
    fn invalid_records_are_dropped() {
        let raw = r#"[
            {"course":"CSE220","grade":"A-","credit":3,"point":3.7},
            {"course":"","grade":"A","credit":3,"point":4.0},
            {"course":"BAD","grade":"A","credit":-1,"point":4.0}
        ]"#;
        let courses = decode_course_list(Some(raw));
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_name, "CSE220");
    }

    #[test]
    fn oversized_credits_do_not_restore_infinite_gpa() {
        let raw = r#"[
            {"course":"CSE220","grade":"A-","credit":3,"point":3.7},
            {"course":"X1","grade":"A","credit":1e308,"point":4.0},
            {"course":"X2","grade":"A","credit":1e308,"point":4.0}
        ]"#;
        let state = Restored {
            courses: decode_course_list(Some(raw)),
            gpa: decode_scalar(Some("inf")),
            cgpa: None,
        }
        .into_state();
        assert_eq!(state.courses().len(), 1);
        assert!(state.gpa().is_some_and(f64::is_finite));
    }

    #[test]
    fn snapshot_entries_cover_session_keys() {
        let snapshot = Snapshot::capture(&SessionState::new()).unwrap();
        let keys: Vec<&str> = snapshot.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, SESSION_KEYS);
        assert_eq!(snapshot.course_list, "[]");
        assert_eq!(snapshot.gpa, "0");
    }

    #[test]
    fn restore_replays_gpa_from_courses() {
        let restored = Restored {
            courses: vec![record("A", 3.0, 4.0), record("B", 1.0, 0.0)],
            gpa: Some(1.23),
            cgpa: Some(3.1),
        };
        let state = restored.into_state();
        assert_eq!(state.gpa(), Some(3.0));
        assert_eq!(state.cgpa(), Some(3.1));
        assert!(state.semesters().is_empty());
    }

    #[test]
    fn restore_without_courses_keeps_stored_gpa() {
        let restored = Restored {
            courses: vec![],
            gpa: Some(2.5),
            cgpa: None,
        };
        assert_eq!(restored.into_state().gpa(), Some(2.5));
    }
}
