use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Exercise;

/// Label stored for a day with no training
pub const REST: &str = "Rest";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
  Sunday,
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday,
  Saturday,
}

impl Day {
  /// Week order as displayed, starting on Sunday
  pub const ALL: [Day; 7] = [
    Day::Sunday,
    Day::Monday,
    Day::Tuesday,
    Day::Wednesday,
    Day::Thursday,
    Day::Friday,
    Day::Saturday,
  ];

  pub fn from_date(date: NaiveDate) -> Self {
    match date.weekday() {
      Weekday::Sun => Day::Sunday,
      Weekday::Mon => Day::Monday,
      Weekday::Tue => Day::Tuesday,
      Weekday::Wed => Day::Wednesday,
      Weekday::Thu => Day::Thursday,
      Weekday::Fri => Day::Friday,
      Weekday::Sat => Day::Saturday,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Day::Sunday => "Sunday",
      Day::Monday => "Monday",
      Day::Tuesday => "Tuesday",
      Day::Wednesday => "Wednesday",
      Day::Thursday => "Thursday",
      Day::Friday => "Friday",
      Day::Saturday => "Saturday",
    }
  }
}

impl std::fmt::Display for Day {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Parses full day names case-insensitively ("monday", "Monday")
impl std::str::FromStr for Day {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Day::ALL
      .iter()
      .copied()
      .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("Unknown day: {}", s))
  }
}

/// Muscle groups trained per day
pub type WeeklySchedule = BTreeMap<Day, Vec<String>>;

/// Ordered exercises per day
pub type Routines = BTreeMap<Day, Vec<Exercise>>;
