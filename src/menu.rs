use std::fmt;

use chrono::Weekday;
use serde::Serialize;

/// Code identifying a dining hall on the listing page. The same code selects
/// the parsing routine, so it is never validated up front.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MenuResource(String);

impl MenuResource {
    pub const NEW_RESIDENCE: &'static str = "nrh";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MenuResource {
    fn default() -> Self {
        Self::new(Self::NEW_RESIDENCE)
    }
}

impl fmt::Display for MenuResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One day of a weekly menu.
///
/// Only `dinner` is filled in today. The other meals are part of the shape
/// consumers expect and stay `None` until a parser produces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayMenu {
    pub day: Weekday,
    pub dinner: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soup: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sandwich: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shawarma: Option<Vec<String>>,
}

impl DayMenu {
    pub fn with_dinner(day: Weekday, dinner: Vec<String>) -> Self {
        Self {
            day,
            dinner,
            breakfast: None,
            lunch: None,
            soup: None,
            sandwich: None,
            shawarma: None,
        }
    }
}

/// Day slots in Monday..Saturday order. A parsed menu always has six slots
/// with Saturday left empty; an unrecognised resource yields no slots at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklyMenu {
    pub days: Vec<Option<DayMenu>>,
}

impl WeeklyMenu {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, weekday: Weekday) -> Option<&DayMenu> {
        self.days
            .get(weekday.num_days_from_monday() as usize)
            .and_then(Option::as_ref)
    }
}

/// What a pipeline run hands back, depending on its terminal stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MenuOutput {
    Menu(WeeklyMenu),
    Raw(String),
}
