//! Year-at-a-glance streak heatmap.
//!
//! Everything here is recomputed from the full entry list on each call; there is
//! no cached streak state to invalidate.

use crate::dates::{self, date_key, format_long_date, parse_date};
use crate::models::{CalendarCell, Entry, Heatmap, MonthLabel};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Days in the unpadded window, ending at the window's end date.
pub const WINDOW_DAYS: i64 = 365;

/// Longest backward walk when counting a streak.
const STREAK_SCAN_LIMIT: u32 = 364;

/// Minimum distance in columns between two month labels.
const MONTH_LABEL_SPACING: usize = 2;

/// Intensity levels with their legend text.
pub const LEGEND: [(u8, &str); 5] = [
    (0, "No entries"),
    (1, "1 day streak"),
    (2, "2-3 day streak"),
    (3, "4-7 day streak"),
    (4, "8+ day streak"),
];

pub fn build_heatmap(entries: &[Entry]) -> Heatmap {
    build_heatmap_at(dates::today(), entries)
}

pub fn build_heatmap_at(end: NaiveDate, entries: &[Entry]) -> Heatmap {
    let words = index_entries(entries);
    let (window_start, window_end) = window_bounds(end);
    let (start, padded_end) = padded_bounds(end);
    let day_count = (padded_end - start).num_days() + 1;

    let cells: Vec<CalendarCell> = (0..day_count)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let word = words.get(&date).map(|word| word.to_string());
            let streak_length = if word.is_some() {
                streak_length(date, &words)
            } else {
                0
            };
            CalendarCell {
                date: date_key(date),
                has_entry: word.is_some(),
                word,
                streak_length,
                intensity_level: intensity_level(streak_length),
                is_today: date == end,
                in_window: date >= window_start && date <= window_end,
                weekday: (offset % 7) as u8,
                week: (offset / 7) as usize,
            }
        })
        .collect();

    let week_count = cells.len() / 7;
    let month_labels = month_labels(start, padded_end);

    Heatmap {
        start: date_key(start),
        end: date_key(padded_end),
        window_start: date_key(window_start),
        window_end: date_key(window_end),
        week_count,
        cells,
        month_labels,
    }
}

/// The 365 days ending at `end`, inclusive.
pub fn window_bounds(end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(WINDOW_DAYS - 1), end)
}

/// The window widened to whole Sunday..Saturday weeks.
pub fn padded_bounds(end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let (start, end) = window_bounds(end);
    let lead = start.weekday().num_days_from_sunday() as i64;
    let trail = 6 - end.weekday().num_days_from_sunday() as i64;
    (start - Duration::days(lead), end + Duration::days(trail))
}

/// Consecutive days with an entry ending at `date`, or 0 when `date` has none.
pub fn streak_length(date: NaiveDate, words: &HashMap<NaiveDate, &str>) -> u32 {
    if !words.contains_key(&date) {
        return 0;
    }
    let mut streak = 1;
    let mut day = date;
    for _ in 0..STREAK_SCAN_LIMIT {
        match day.pred_opt() {
            Some(previous) if words.contains_key(&previous) => {
                streak += 1;
                day = previous;
            }
            _ => break,
        }
    }
    streak
}

pub fn intensity_level(streak_length: u32) -> u8 {
    match streak_length {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=7 => 3,
        _ => 4,
    }
}

pub fn css_class(intensity_level: u8) -> String {
    match intensity_level {
        0 => "color-empty".to_string(),
        level => format!("color-scale-{}", level.min(4)),
    }
}

/// Month names placed at the column holding the month's first in-grid day among days 1-7.
pub fn month_labels(start: NaiveDate, end: NaiveDate) -> Vec<MonthLabel> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut date = start;
    let mut offset = 0usize;
    while date <= end {
        if date.day() <= 7 && seen.insert((date.year(), date.month())) {
            candidates.push(MonthLabel {
                month: date.format("%b").to_string(),
                week: offset / 7,
            });
        }
        offset += 1;
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    drop_crowded_labels(candidates)
}

fn drop_crowded_labels(candidates: Vec<MonthLabel>) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::with_capacity(candidates.len());
    for label in candidates {
        if let Some(previous) = labels.last() {
            if label.week < previous.week + MONTH_LABEL_SPACING {
                debug!(month = %label.month, week = label.week, "month label suppressed");
                continue;
            }
        }
        labels.push(label);
    }
    labels
}

fn index_entries(entries: &[Entry]) -> HashMap<NaiveDate, &str> {
    let mut words = HashMap::with_capacity(entries.len());
    for entry in entries {
        match parse_date(&entry.date) {
            Some(date) => {
                words.entry(date).or_insert(entry.word.as_str());
            }
            None => debug!(date = %entry.date, "skipping entry with unreadable date"),
        }
    }
    words
}

impl CalendarCell {
    pub fn tooltip(&self) -> String {
        let heading = parse_date(&self.date)
            .map(format_long_date)
            .unwrap_or_else(|| self.date.clone());
        match &self.word {
            None => format!("{heading}\nNo entry"),
            Some(word) if self.streak_length > 1 => {
                format!("{heading}\n{word} • {} day streak", self.streak_length)
            }
            Some(word) => format!("{heading}\n{word}"),
        }
    }

    pub fn css_class(&self) -> String {
        css_class(self.intensity_level)
    }
}
