//! Reading a previously converted timeline document back in.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::TitleConfig;
use crate::error::{PipelineError, Result};
use crate::normalize::clean_date_parts;
use crate::sanitize::to_plain_value;
use crate::types::{EventText, MediaRef, TimelineDocument, TimelineEvent, TitleSlide};

impl TimelineDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Lenient reader for hand-edited documents. Dates are cleaned, events without
    /// a positive start year or typed `title` are skipped with a warning, and a
    /// missing title becomes the default placeholder.
    pub fn from_value(value: &Value) -> Result<Self> {
        let plain = to_plain_value(value)?;
        let root = plain.as_object().ok_or_else(|| {
            PipelineError::InvalidDocument("document root must be an object".to_string())
        })?;
        let entries = root
            .get("events")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                PipelineError::InvalidDocument("document has no `events` array".to_string())
            })?;

        let mut events = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match read_event(entry) {
                Some(event) if event.is_title() => {
                    warn!(index, "title-typed event in the events list skipped");
                }
                Some(event) => events.push(event),
                None => warn!(index, "event without a usable start year skipped"),
            }
        }

        let title = match root.get("title").and_then(Value::as_object) {
            Some(title) => read_title(title),
            None => {
                let defaults = TitleConfig::default();
                TitleSlide::placeholder(defaults.headline, defaults.text)
            }
        };

        Ok(TimelineDocument { title, events })
    }
}

fn read_title(map: &Map<String, Value>) -> TitleSlide {
    let as_value = Value::Object(map.clone());
    if map.contains_key("start_date") {
        if let Some(event) = read_event(&as_value) {
            return TitleSlide::Event(event);
        }
    }
    TitleSlide::Default {
        text: read_text(map),
    }
}

fn read_event(value: &Value) -> Option<TimelineEvent> {
    let map = value.as_object()?;
    let start_date = map
        .get("start_date")
        .and_then(clean_date_parts)
        .filter(|date| date.has_valid_year())?;

    let mut event = TimelineEvent::new(start_date, read_text(map));
    event.end_date = map.get("end_date").and_then(clean_date_parts);
    event.media = lenient(map, "media").filter(|media: &MediaRef| !media.url.is_empty());
    event.background = lenient(map, "background");
    event.group = string_field(map, "group");
    event.display_date = string_field(map, "display_date");
    event.event_type = string_field(map, "type");
    Some(event)
}

fn read_text(map: &Map<String, Value>) -> EventText {
    lenient(map, "text").unwrap_or_default()
}

fn lenient<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
