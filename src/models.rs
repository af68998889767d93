use serde::{Deserialize, Serialize};

/// One day's word. `date` is the canonical `YYYY-MM-DD` calendar key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: String,
    pub word: String,
}

impl Entry {
    pub fn new(date: impl Into<String>, word: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            word: word.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: String,
    pub has_entry: bool,
    pub word: Option<String>,
    pub streak_length: u32,
    pub intensity_level: u8,
    pub is_today: bool,
    /// False for the week-alignment padding around the 365-day window.
    pub in_window: bool,
    /// Row, 0 = Sunday.
    pub weekday: u8,
    /// Column.
    pub week: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub month: String,
    pub week: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub start: String,
    pub end: String,
    pub window_start: String,
    pub window_end: String,
    pub week_count: usize,
    pub cells: Vec<CalendarCell>,
    pub month_labels: Vec<MonthLabel>,
}

impl Heatmap {
    pub fn cell(&self, date: &str) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }

    /// Cells grouped by column, each column Sunday..Saturday.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Deserialize)]
pub struct WordRequest {
    pub word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub word: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub entry: Entry,
    pub updated: bool,
}
