use serde::{Deserialize, Serialize};

/// Session state as reported by the external tracker's `get` operation.
///
/// Only the edited-file set is interpreted here; everything else the tracker
/// stores is opaque to this system. Membership sets only grow within a
/// session and are reset at session-start, all on the tracker side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub files_edited: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_defaults_to_empty() {
        let state: SessionState = serde_json::from_str("{}").unwrap();
        assert!(state.files_edited.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let state: SessionState =
            serde_json::from_str(r#"{"files_edited": ["a.rs"], "advisors": ["x"]}"#).unwrap();
        assert_eq!(state.files_edited, vec!["a.rs"]);
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(serde_json::from_str::<SessionState>(r#"{"files_edited": "oops"}"#).is_err());
    }
}
