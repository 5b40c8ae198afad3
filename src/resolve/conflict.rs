//! Structured conflict records produced by the order resolver.

use serde::{Deserialize, Serialize};

use crate::model::types::FragmentId;

/// One fallback placement made against unmet ordering constraints.
///
/// Records the fragment that was placed out of order and the fragments whose
/// required precedence could not be honored, in declaration order. Conflicts
/// are never fatal; the record exists so diagnostics can name the exact
/// disagreement between entry orderings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// The fragment placed despite unsatisfied constraints.
    pub fragment: FragmentId,
    /// Fragments that at least one entry required to come first, but which
    /// were still unplaced at fallback time.
    pub unmet: Vec<FragmentId>,
}

#[cfg(test)]
#[allow(clippy::all, clippy::pedantic, clippy::nursery)]
mod tests {
    use super::*;

    #[test]
    fn conflict_record_serde_roundtrip() {
        let record = ConflictRecord {
            fragment: FragmentId::new("./a.css", 0).unwrap(),
            unmet: vec![FragmentId::new("./b.css", 0).unwrap()],
        };
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ConflictRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
