use tracing::debug;

use crate::config::TitleConfig;
use crate::types::{TimelineDocument, TimelineEvent, TitleSlide};

/// Splits accepted events into the title slide and the ordered body.
///
/// The first event typed `title` becomes the title slide; later ones are dropped.
/// Without one, a text-only placeholder built from `defaults` is used.
pub fn assemble_document(events: Vec<TimelineEvent>, defaults: &TitleConfig) -> TimelineDocument {
    let mut title: Option<TimelineEvent> = None;
    let mut body = Vec::with_capacity(events.len());

    for event in events {
        if !event.is_title() {
            body.push(event);
        } else if title.is_none() {
            title = Some(event);
        } else {
            debug!(
                headline = %event.text.headline,
                "additional title event left out of the document"
            );
        }
    }

    let title = match title {
        Some(event) => TitleSlide::Event(event),
        None => TitleSlide::placeholder(&defaults.headline, &defaults.text),
    };

    TimelineDocument {
        title,
        events: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateParts, EventText};

    fn event(year: i64, headline: &str, event_type: Option<&str>) -> TimelineEvent {
        let mut event = TimelineEvent::new(DateParts::year(year), EventText::new(headline, ""));
        event.event_type = event_type.map(str::to_string);
        event
    }

    #[test]
    fn first_title_event_wins_and_all_titles_leave_the_body() {
        let events = vec![
            event(1950, "Intro", Some("title")),
            event(1957, "Sputnik", None),
            event(1960, "Second title", Some("title")),
            event(1969, "Moon", Some("milestone")),
        ];
        let document = assemble_document(events, &TitleConfig::default());

        assert_eq!(document.title.text().headline, "Intro");
        let headlines: Vec<&str> = document
            .events
            .iter()
            .map(|event| event.text.headline.as_str())
            .collect();
        assert_eq!(headlines, vec!["Sputnik", "Moon"]);
    }

    #[test]
    fn placeholder_title_when_no_row_is_typed_title() {
        let document = assemble_document(vec![event(1969, "Moon", None)], &TitleConfig::default());
        assert_eq!(
            document.title,
            TitleSlide::placeholder("Timeline", "Generated from Excel")
        );
        assert_eq!(document.events.len(), 1);
    }

    #[test]
    fn title_match_is_case_sensitive() {
        let document = assemble_document(vec![event(1969, "Moon", Some("Title"))], &TitleConfig::default());
        assert!(document.title.is_placeholder());
        assert_eq!(document.events.len(), 1);
    }
}
