//! Activity streaks and weekly progress
//!
//! Streaks are computed from the unified activity log: any activity type on a
//! day makes it an active day.

use std::collections::HashSet;

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::warn;

use crate::error::Result;
use crate::journal::Journal;
use crate::models::{ActivityLogEntry, ActivityType};

use super::types::WeeklyProgress;

/// Longest streak the tracker looks back for
const MAX_STREAK_DAYS: i64 = 30;

const DEFAULT_WEEKLY_GOAL_DAYS: u32 = 5;

/// Streak, weekly progress and badges from the activity log
pub struct StreakTracker<'a> {
    journal: &'a Journal,
    weekly_goal_days: u32,
}

impl<'a> StreakTracker<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self {
            journal,
            weekly_goal_days: DEFAULT_WEEKLY_GOAL_DAYS,
        }
    }

    pub fn with_weekly_goal(mut self, days: u32) -> Self {
        self.weekly_goal_days = days;
        self
    }

    /// Record an activity unless one of the same type already exists for `date`
    ///
    /// Returns whether a new entry was written.
    pub fn try_log_activity(
        &self,
        activity_type: ActivityType,
        date: NaiveDate,
        payload: serde_json::Value,
    ) -> Result<bool> {
        self.journal.repo::<ActivityLogEntry>().try_append_unless(
            ActivityLogEntry {
                activity_type,
                date,
                payload,
            },
            |e| e.activity_type == activity_type && e.date == date,
        )
    }

    /// Record an activity, logging storage failures
    pub fn log_activity(
        &self,
        activity_type: ActivityType,
        date: NaiveDate,
        payload: serde_json::Value,
    ) {
        if let Err(e) = self.try_log_activity(activity_type, date, payload) {
            warn!(activity = %activity_type, %date, error = %e, "Failed to log activity");
        }
    }

    fn active_days(&self) -> HashSet<NaiveDate> {
        self.journal
            .repo::<ActivityLogEntry>()
            .all()
            .into_iter()
            .map(|e| e.date)
            .collect()
    }

    /// Consecutive active days ending today
    pub fn current_streak(&self) -> u32 {
        self.current_streak_on(Local::now().date_naive())
    }

    pub fn current_streak_on(&self, today: NaiveDate) -> u32 {
        streak_from(&self.active_days(), today)
    }

    pub fn weekly_progress(&self) -> WeeklyProgress {
        self.weekly_progress_on(Local::now().date_naive())
    }

    /// Distinct active days in the Sunday-start week containing `today` and the week before
    pub fn weekly_progress_on(&self, today: NaiveDate) -> WeeklyProgress {
        let active = self.active_days();
        let week_start = week_start(today);
        let last_week_start = week_start - Duration::days(7);
        let next_week_start = week_start + Duration::days(7);

        let count = |from: NaiveDate, until: NaiveDate| {
            active.iter().filter(|d| **d >= from && **d < until).count() as u32
        };

        WeeklyProgress {
            week_start,
            this_week_days: count(week_start, next_week_start),
            last_week_days: count(last_week_start, week_start),
            goal_days: self.weekly_goal_days,
        }
    }

    pub fn recent_achievements(&self) -> Vec<String> {
        self.recent_achievements_on(Local::now().date_naive())
    }

    /// Up to three badges, highest priority first
    pub fn recent_achievements_on(&self, today: NaiveDate) -> Vec<String> {
        let entries = self.journal.repo::<ActivityLogEntry>().all();
        let active: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();
        let streak = streak_from(&active, today);
        let count_of = |t: ActivityType| entries.iter().filter(|e| e.activity_type == t).count();

        achievements(streak, count_of(ActivityType::Weight), count_of(ActivityType::Goal))
    }
}

/// Sunday on or before `day`
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

fn streak_from(active: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    (0..MAX_STREAK_DAYS)
        .map(|offset| today - Duration::days(offset))
        .take_while(|day| active.contains(day))
        .count() as u32
}

fn achievements(streak: u32, weight_logs: usize, goal_logs: usize) -> Vec<String> {
    let candidates = [
        (streak >= 7, "🔥 Week Warrior: 7-day streak"),
        (streak >= 3, "⭐ On a Roll: 3-day streak"),
        (weight_logs >= 5, "⚖️ Consistent Tracker: 5 weigh-ins"),
        (goal_logs >= 10, "🎯 Goal Getter: 10 goal days"),
    ];

    candidates
        .iter()
        .filter(|(earned, _)| *earned)
        .map(|(_, badge)| badge.to_string())
        .take(3)
        .collect()
}
