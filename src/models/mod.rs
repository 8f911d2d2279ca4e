pub mod exercise;
pub mod profile;
pub mod record;
pub mod schedule;
pub mod workout;

pub use exercise::Exercise;
pub use profile::UserProfile;
pub use record::PersonalRecord;
pub use schedule::{Day, Routines, WeeklySchedule, REST};
pub use workout::{SetLog, WorkoutLog, WorkoutLogEntry};
