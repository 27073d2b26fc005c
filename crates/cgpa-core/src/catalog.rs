//! Read-only registry of institution grading scales.
//!
//! The tables are `static` data: there is no mutation path, so every lookup
//! in a run sees the same scales.

use crate::error::LookupError;
use crate::model::GradingSystemId;

/// An institution's mapping from grade label to grade point.
#[derive(Debug)]
pub struct GradingSystem {
    pub id: GradingSystemId,
    /// Human-readable institution name.
    pub name: &'static str,
    /// Ordered `(label, point)` pairs, best grade first.
    pub scale: &'static [(&'static str, f64)],
}

impl GradingSystem {
    /// Case-insensitive label lookup.
    pub fn point_for(&self, label: &str) -> Option<f64> {
        let label = label.trim();
        self.scale
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, p)| *p)
    }

    /// Declared labels in scale order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.scale.iter().map(|(l, _)| *l)
    }
}

const PUBLIC_SCALE: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 3.75),
    ("A-", 3.5),
    ("B+", 3.25),
    ("B", 3.0),
    ("B-", 2.75),
    ("C+", 2.5),
    ("C", 2.25),
    ("D", 2.0),
    ("F", 0.0),
];

const FOUR_POINT_SCALE: &[(&str, f64)] = &[
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

const BRAC_SCALE: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
];

const UIU_SCALE: &[(&str, f64)] = &[
    ("A", 4.0),
    ("A-", 3.67),
    ("B+", 3.33),
    ("B", 3.0),
    ("B-", 2.67),
    ("C+", 2.33),
    ("C", 2.0),
    ("C-", 1.67),
    ("D+", 1.33),
    ("D", 1.0),
    ("F", 0.0),
];

const ULAB_SCALE: &[(&str, f64)] = &[
    ("A", 4.0),
    ("A-", 3.2),
    ("B+", 3.0),
    ("B", 2.9),
    ("B-", 2.8),
    ("C", 2.0),
    ("C-", 1.5),
    ("D", 1.0),
    ("D-", 1.0),
    ("F", 0.0),
];

const AIUB_SCALE: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 3.75),
    ("B+", 3.5),
    ("B", 3.25),
    ("C+", 3.0),
    ("C", 2.75),
    ("D+", 2.5),
    ("D", 2.25),
    ("F", 0.0),
];

static SYSTEMS: [GradingSystem; 9] = [
    GradingSystem {
        id: GradingSystemId::Pub,
        name: "Public Universities",
        scale: PUBLIC_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Nsu,
        name: "North South University",
        scale: FOUR_POINT_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Iub,
        name: "Independent University, Bangladesh",
        scale: FOUR_POINT_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Brac,
        name: "BRAC University",
        scale: BRAC_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Uiu,
        name: "United International University",
        scale: UIU_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Ulab,
        name: "University of Liberal Arts Bangladesh",
        scale: ULAB_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Edu,
        name: "East Delta University",
        scale: FOUR_POINT_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Aiub,
        name: "American International University-Bangladesh",
        scale: AIUB_SCALE,
    },
    GradingSystem {
        id: GradingSystemId::Pri,
        name: "Private Universities",
        scale: PUBLIC_SCALE,
    },
];

/// All registered grading systems, in presentation order.
pub fn systems() -> &'static [GradingSystem] {
    &SYSTEMS
}

/// The grading system registered under `id`.
pub fn system(id: GradingSystemId) -> &'static GradingSystem {
    // SYSTEMS is declared in discriminant order.
    &SYSTEMS[id as usize]
}

/// Resolve a grade point by label within an already-parsed system.
pub fn resolve(label: &str, id: GradingSystemId) -> Result<f64, LookupError> {
    system(id)
        .point_for(label)
        .ok_or_else(|| LookupError::UnknownGrade {
            label: label.trim().to_string(),
            system: id.to_string(),
        })
}

/// Resolve a grade point from raw user strings.
///
/// Unknown systems and unknown labels both yield a `LookupError`.
pub fn resolve_point(label: &str, system_id: &str) -> Result<f64, LookupError> {
    let id: GradingSystemId = system_id.parse()?;
    resolve(label, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn systems_follow_id_order() {
        for (system, id) in systems().iter().zip(GradingSystemId::ALL) {
            assert_eq!(system.id, id);
            assert!(std::ptr::eq(super::system(id), system));
        }
    }

    #[test]
    fn every_system_has_failing_grade_at_zero() {
        for system in systems() {
            assert_eq!(system.point_for("F"), Some(0.0), "{}", system.id);
        }
    }

    #[test]
    fn labels_are_unique_within_a_system() {
        for system in systems() {
            let mut labels: Vec<&str> = system.labels().collect();
            let total = labels.len();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), total, "duplicate label in {}", system.id);
        }
    }

    #[test]
    fn points_are_non_negative() {
        for system in systems() {
            assert!(system.scale.iter().all(|(_, p)| *p >= 0.0));
        }
    }

    #[test]
    fn lookup_is_case_insensitive_and_total() {
        for system in systems() {
            for (label, point) in system.scale {
                let lower = label.to_lowercase();
                assert_eq!(resolve_point(label, system.id.code()), Ok(*point));
                assert_eq!(resolve_point(&lower, &system.id.code().to_lowercase()), Ok(*point));
            }
        }
    }

    #[test]
    fn nsu_a_minus_is_three_seven() {
        assert_eq!(resolve_point("A-", "NSU"), Ok(3.7));
        assert_eq!(resolve_point("b+", "NSU"), Ok(3.3));
    }

    #[test]
    fn unknown_label_or_system_is_not_found() {
        assert_eq!(
            resolve_point("A+", "NSU"),
            Err(LookupError::UnknownGrade {
                label: "A+".into(),
                system: "NSU".into()
            })
        );
        assert_eq!(
            resolve_point("A", "HARVARD"),
            Err(LookupError::UnknownSystem("HARVARD".into()))
        );
        assert_eq!(resolve_point("A", ""), Err(LookupError::NoSystem));
        assert!(resolve_point("", "PUB").is_err());
    }
}
