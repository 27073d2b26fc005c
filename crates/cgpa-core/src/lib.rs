//! cgpa-core: Grading catalog, GPA/CGPA aggregation, and session persistence.
//!
//! This crate defines the data model, the read-only grading-scale registry,
//! the pure aggregation engine, and the session layer that keeps an in-memory
//! `SessionState` synchronized with a `KeyValueStore`.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod persist;
pub mod report;
pub mod session;
pub mod traits;
pub mod writer;

pub use error::{LookupError, SessionError, StoreError, ValidationError};
pub use model::{CourseRecord, GradingSystemId, SemesterSummary, SessionState};
pub use session::{Phase, Session};
pub use traits::KeyValueStore;
