use serde::{Deserialize, Serialize};

/// `type` value that marks a row as the title slide.
pub const TITLE_TYPE: &str = "title";

/// Partial calendar date with optional time of day. Absent parts are omitted from
/// the serialized form, never written as `null` or `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i64>,
}

impl DateParts {
    pub fn year(year: i64) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
    }

    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.hour = time.hour;
        self.minute = time.minute;
        self.second = time.second;
        self
    }

    /// `None` when no part is present.
    pub fn cleaned(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }

    pub fn has_valid_year(&self) -> bool {
        matches!(self.year, Some(year) if year > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventText {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub text: String,
}

impl EventText {
    pub fn new(headline: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: String,
    #[serde(default)]
    pub credit: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub color: String,
}

/// One slide of the timeline. Optional keys are left out of the JSON entirely when
/// their source cell was blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub start_date: DateParts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateParts>,
    pub text: EventText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

impl TimelineEvent {
    pub fn new(start_date: DateParts, text: EventText) -> Self {
        Self {
            start_date,
            end_date: None,
            text,
            media: None,
            group: None,
            background: None,
            display_date: None,
            event_type: None,
        }
    }

    pub fn is_title(&self) -> bool {
        self.event_type.as_deref() == Some(TITLE_TYPE)
    }
}

/// The introductory slide: either a row typed `title`, or a text-only placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TitleSlide {
    Event(TimelineEvent),
    Default { text: EventText },
}

impl TitleSlide {
    pub fn placeholder(headline: impl Into<String>, text: impl Into<String>) -> Self {
        TitleSlide::Default {
            text: EventText::new(headline, text),
        }
    }

    pub fn text(&self) -> &EventText {
        match self {
            TitleSlide::Event(event) => &event.text,
            TitleSlide::Default { text } => text,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, TitleSlide::Default { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDocument {
    pub title: TitleSlide,
    pub events: Vec<TimelineEvent>,
}
