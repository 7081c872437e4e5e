//! Correlation ID generation.

use uuid::Uuid;

/// Source of unique correlation IDs.
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier, unique per call.
    fn new_id(&self) -> String;
}

/// Generates hyphenated UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
