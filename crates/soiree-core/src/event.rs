//! The `event_description_ready` hand-off contract.
//!
//! One fixed function is offered to the model on every completion request.
//! When the model invokes it the conversation is done: the arguments are
//! validated, rendered into a hand-off summary, and sent back to the user.

use serde::Deserialize;
use soiree_provider::ToolDef;

pub const TOOL_NAME: &str = "event_description_ready";

/// Arguments of `event_description_ready`. The model fills these once it
/// judges the event details complete; parsing rejects any missing required
/// field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventDetails {
    pub event_type: String,
    pub event_date: String,
    pub event_location: String,
    pub event_description: String,
    pub event_guests: String,
    #[serde(default)]
    pub special_notes: Option<String>,
}

impl EventDetails {
    pub fn from_args(input: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(input.clone())
    }

    /// The fixed hand-off summary relayed to the user. Absent special notes
    /// render as an empty line, not an omitted one.
    pub fn render_summary(&self) -> String {
        format!(
            "Sending the following information:\n\n\
             Event Type: {}\n\
             Event Date: {}\n\
             Event Location: {}\n\
             Event Description: {}\n\
             Event Guests: {}\n\
             Special Notes: {}",
            self.event_type,
            self.event_date,
            self.event_location,
            self.event_description,
            self.event_guests,
            self.special_notes.as_deref().unwrap_or(""),
        )
    }
}

/// The function descriptor passed with every completion request. Declared
/// once; never changes at runtime.
pub fn tool_def() -> ToolDef {
    ToolDef {
        name: TOOL_NAME.to_string(),
        description: "Send the event information when all details are collected".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "event_type": {
                    "type": "string",
                    "description": "Short description of the type of event. Wedding, birthday, etc."
                },
                "event_date": {
                    "type": "string",
                    "description": "Date of the event"
                },
                "event_location": {
                    "type": "string",
                    "description": "Location of the event, ideally the address or name of the venue"
                },
                "event_description": {
                    "type": "string",
                    "description": "Description of the event"
                },
                "event_guests": {
                    "type": "string",
                    "description": "Number of guests expected at the event"
                },
                "special_notes": {
                    "type": "string",
                    "description": "Any special notes or instructions for the event"
                }
            },
            "required": [
                "event_type",
                "event_date",
                "event_location",
                "event_description",
                "event_guests"
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_args() -> serde_json::Value {
        serde_json::json!({
            "event_type": "Wedding",
            "event_date": "June 5",
            "event_location": "Central Park",
            "event_description": "Outdoor ceremony and reception",
            "event_guests": "100",
            "special_notes": "Vegetarian menu"
        })
    }

    #[test]
    fn parses_all_fields() {
        let details = EventDetails::from_args(&full_args()).unwrap();
        assert_eq!(details.event_type, "Wedding");
        assert_eq!(details.special_notes.as_deref(), Some("Vegetarian menu"));
    }

    #[test]
    fn special_notes_is_optional() {
        let mut args = full_args();
        args.as_object_mut().unwrap().remove("special_notes");
        let details = EventDetails::from_args(&args).unwrap();
        assert_eq!(details.special_notes, None);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut args = full_args();
        args.as_object_mut().unwrap().remove("event_date");
        let err = EventDetails::from_args(&args).err().unwrap();
        assert!(err.to_string().contains("event_date"));
    }

    #[test]
    fn summary_enumerates_all_six_fields() {
        let details = EventDetails::from_args(&full_args()).unwrap();
        let summary = details.render_summary();
        assert!(summary.starts_with("Sending the following information:"));
        assert!(summary.contains("Event Type: Wedding"));
        assert!(summary.contains("Event Date: June 5"));
        assert!(summary.contains("Event Location: Central Park"));
        assert!(summary.contains("Event Description: Outdoor ceremony and reception"));
        assert!(summary.contains("Event Guests: 100"));
        assert!(summary.contains("Special Notes: Vegetarian menu"));
    }

    #[test]
    fn summary_renders_empty_special_notes_line() {
        let mut args = full_args();
        args.as_object_mut().unwrap().remove("special_notes");
        let details = EventDetails::from_args(&args).unwrap();
        let summary = details.render_summary();
        assert_eq!(summary.lines().last(), Some("Special Notes: "));
    }

    #[test]
    fn tool_def_declares_required_fields() {
        let def = tool_def();
        assert_eq!(def.name, TOOL_NAME);
        let required = def.input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 5);
        assert!(!required.iter().any(|f| f == "special_notes"));
        assert!(def.input_schema["properties"]["special_notes"].is_object());
    }
}
