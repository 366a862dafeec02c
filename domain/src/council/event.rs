//! Progress events emitted while a council run advances.
//!
//! Serialized as `{"type": ..., "data"?: ..., "metadata"?: ..., "message"?: ...}`,
//! one JSON object per event.

use super::value_objects::{CouncilMetadata, Stage1Result, Stage2Result, Stage3Result};
use serde::{Deserialize, Serialize};

/// Payload of a `title_complete` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

/// A stage-transition event in a streamed council run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    Stage1Start,
    Stage1Complete {
        data: Vec<Stage1Result>,
    },
    Stage2Start,
    Stage2Complete {
        data: Vec<Stage2Result>,
        metadata: CouncilMetadata,
    },
    Stage3Start,
    Stage3Complete {
        data: Stage3Result,
    },
    TitleComplete {
        data: TitlePayload,
    },
    Complete,
    Error {
        message: String,
    },
}

impl CouncilEvent {
    /// Wire name of the event (`"stage1_start"`, `"complete"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            CouncilEvent::Stage1Start => "stage1_start",
            CouncilEvent::Stage1Complete { .. } => "stage1_complete",
            CouncilEvent::Stage2Start => "stage2_start",
            CouncilEvent::Stage2Complete { .. } => "stage2_complete",
            CouncilEvent::Stage3Start => "stage3_start",
            CouncilEvent::Stage3Complete { .. } => "stage3_complete",
            CouncilEvent::TitleComplete { .. } => "title_complete",
            CouncilEvent::Complete => "complete",
            CouncilEvent::Error { .. } => "error",
        }
    }

    /// Returns true for the two events that end a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Complete | CouncilEvent::Error { .. })
    }

    pub fn error(message: impl Into<String>) -> Self {
        CouncilEvent::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;

    #[test]
    fn test_unit_event_wire_format() {
        let json = serde_json::to_string(&CouncilEvent::Stage1Start).unwrap();
        assert_eq!(json, r#"{"type":"stage1_start"}"#);
    }

    #[test]
    fn test_data_event_wire_format() {
        let event = CouncilEvent::Stage3Complete {
            data: Stage3Result::new(Model::Gpt51, "final"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "stage3_complete");
        assert_eq!(json["data"]["model"], "openai/gpt-5.1");
        assert_eq!(json["data"]["response"], "final");
    }

    #[test]
    fn test_error_event_wire_format() {
        let json = serde_json::to_value(CouncilEvent::error("boom")).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "boom");
    }

    #[test]
    fn test_kind_matches_serialized_type() {
        let events = vec![
            CouncilEvent::Stage2Start,
            CouncilEvent::TitleComplete {
                data: TitlePayload {
                    title: "Rust".to_string(),
                },
            },
            CouncilEvent::Complete,
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }

    #[test]
    fn test_terminal_events() {
        assert!(CouncilEvent::Complete.is_terminal());
        assert!(CouncilEvent::error("x").is_terminal());
        assert!(!CouncilEvent::Stage3Start.is_terminal());
    }
}
