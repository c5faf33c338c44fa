//! Turns the flattened menu text into a [`WeeklyMenu`].
//!
//! The extractor loses all layout, so the parser works purely on literal
//! markers. Each marker split is its own function returning a [`Split`], and
//! a marker the layout depends on being present surfaces as
//! [`ParseError::MissingMarker`] instead of silently producing garbage.

use std::sync::LazyLock;

use chrono::Weekday;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::menu::{DayMenu, MenuResource, WeeklyMenu};

/// Day headings in the order they appear in the document. Saturday only
/// bounds Friday's section and never gets parsed itself.
pub const DAYS: [(Weekday, &str); 6] = [
    (Weekday::Mon, "MONDAY"),
    (Weekday::Tue, "TUESDAY"),
    (Weekday::Wed, "WEDNESDAY"),
    (Weekday::Thu, "THURSDAY"),
    (Weekday::Fri, "FRIDAY"),
    (Weekday::Sat, "SATURDAY"),
];

pub const DINNER: &str = "DINNER";
pub const SPECIALS: &str = "SPECIALS";
/// Letter-spaced heading as it comes out of the extractor.
pub const LEGEND: &str = "L E G E N D";
/// "for GRILL ITEMS SANDWICHES" with the space lost during extraction.
pub const GRILL_ITEMS: &str = "forGRILL ITEMS SANDWICHES";

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-z][A-Z]").expect("case boundary regex should compile"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("marker {marker:?} not found in {scope}")]
    MissingMarker { marker: String, scope: String },
}

impl ParseError {
    fn missing(marker: &str, scope: &str) -> Self {
        Self::MissingMarker {
            marker: marker.to_string(),
            scope: scope.to_string(),
        }
    }
}

/// Outcome of looking for a marker: the text on either side of its first
/// occurrence, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split<'a> {
    Found { before: &'a str, after: &'a str },
    Absent,
}

impl<'a> Split<'a> {
    pub fn at(text: &'a str, marker: &str) -> Self {
        match text.split_once(marker) {
            Some((before, after)) => Split::Found { before, after },
            None => Split::Absent,
        }
    }
}

/// Text following the first `marker`. The marker is required.
pub fn after_marker<'a>(text: &'a str, marker: &str, scope: &str) -> Result<&'a str, ParseError> {
    match Split::at(text, marker) {
        Split::Found { after, .. } => Ok(after),
        Split::Absent => Err(ParseError::missing(marker, scope)),
    }
}

/// Text preceding the first `marker`, or all of `text` when the marker is
/// not there.
pub fn before_marker<'a>(text: &'a str, marker: &str) -> &'a str {
    match Split::at(text, marker) {
        Split::Found { before, .. } => before,
        Split::Absent => text,
    }
}

/// Everything after `day`'s heading up to the next day's heading.
pub fn day_section<'a>(text: &'a str, day: &str, next_day: &str) -> Result<&'a str, ParseError> {
    let rest = after_marker(text, day, "menu text")?;
    Ok(before_marker(rest, next_day))
}

/// The dinner block of one day's section, cut off at whichever trailing
/// heading comes first.
pub fn dinner_section<'a>(day_text: &'a str, day: &str) -> Result<&'a str, ParseError> {
    let dinner = after_marker(day_text, DINNER, day)?;
    let dinner = before_marker(dinner, SPECIALS);
    let dinner = before_marker(dinner, LEGEND);
    Ok(before_marker(dinner, GRILL_ITEMS))
}

/// Splits run-together items at every lowercase→uppercase transition.
///
/// Nothing is consumed, so the pieces concatenate back to `text`. Digits and
/// uppercase runs never start a new item: `"PASTAWithSauce"` becomes
/// `["PASTAWith", "Sauce"]`.
pub fn split_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut start = 0;
    for boundary in CASE_BOUNDARY.find_iter(text) {
        // both matched chars are ASCII, so +1 lands on a char boundary
        let cut = boundary.start() + 1;
        items.push(text[start..cut].to_string());
        start = cut;
    }
    items.push(text[start..].to_string());
    items
}

/// Parses `text` with the routine registered for `resource`. Unknown
/// resources produce an empty menu rather than an error.
pub fn parse_menu_text(text: &str, resource: &MenuResource) -> Result<WeeklyMenu, ParseError> {
    match resource.as_str() {
        MenuResource::NEW_RESIDENCE => parse_nrh_menu_text(text),
        other => {
            debug!(resource = other, "no parser for resource, returning empty menu");
            Ok(WeeklyMenu::default())
        }
    }
}

pub fn parse_nrh_menu_text(text: &str) -> Result<WeeklyMenu, ParseError> {
    let mut days = Vec::with_capacity(DAYS.len());
    for (i, &(weekday, name)) in DAYS.iter().enumerate() {
        if weekday == Weekday::Sat {
            days.push(None);
            continue;
        }
        let next_day = DAYS[i + 1].1;
        let section = day_section(text, name, next_day)?;
        let dinner = split_items(dinner_section(section, name)?);
        debug!(
            day = name,
            section_len = section.len(),
            items = dinner.len(),
            "parsed day"
        );
        days.push(Some(DayMenu::with_dinner(weekday, dinner)));
    }
    Ok(WeeklyMenu { days })
}
