//! Recording user actions
//!
//! Everything a screen would write goes through here: weigh-ins, meals,
//! water, wins, daily goals, the survey and explicit deletes. Actions that
//! count toward the streak also record an activity.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::json;

use crate::error::{Error, Result};
use crate::insights::StreakTracker;
use crate::journal::Journal;
use crate::models::{
    ActivityType, DailyGoal, DailyGoalRecord, DailyWin, MealEntry, SurveyProfile, WaterLog,
    WeightEntry,
};

/// Writes user-entered records through the journal
pub struct Tracker<'a> {
    journal: &'a Journal,
}

impl<'a> Tracker<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Record a weigh-in and a `weight` activity for its day
    ///
    /// Only the weigh-in write can fail; the activity is logged and swallowed.
    /// Precondition: `weight` is positive.
    pub fn log_weight(&self, weight: f64, at: NaiveDateTime) -> Result<()> {
        self.journal.repo::<WeightEntry>().try_append(WeightEntry {
            weight,
            date: at.date(),
            time: at.time(),
        })?;
        StreakTracker::new(self.journal).log_activity(
            ActivityType::Weight,
            at.date(),
            json!({ "weight": weight }),
        );
        Ok(())
    }

    /// Most recent weigh-in
    pub fn latest_weight(&self) -> Option<WeightEntry> {
        self.journal.repo::<WeightEntry>().list_recent(1).pop()
    }

    pub fn log_meal(&self, meal: MealEntry) -> Result<()> {
        self.journal.repo::<MealEntry>().try_append(meal)
    }

    /// Meals whose timestamp falls on `day`, in logged order
    pub fn meals_on(&self, day: NaiveDate) -> Vec<MealEntry> {
        self.journal
            .repo::<MealEntry>()
            .all()
            .into_iter()
            .filter(|m| m.timestamp.date() == day)
            .collect()
    }

    /// Add cups of water, resetting the count when the day has changed
    pub fn log_water(&self, cups: u32, now: NaiveDateTime) -> Result<WaterLog> {
        self.journal
            .try_update_document::<WaterLog, _>(|current| {
                let mut log = current.unwrap_or_default().for_day(now.date());
                log.cups_today = log.cups_today.saturating_add(cups);
                log.last_drink_time = Some(now);
                (log.clone(), log)
            })
    }

    /// Today's water log; a log stored for another day reads as zero cups
    pub fn water_on(&self, day: NaiveDate) -> WaterLog {
        self.journal
            .load::<WaterLog>()
            .unwrap_or_default()
            .for_day(day)
    }

    /// Record a daily win and a `win` activity for its day
    pub fn log_win(&self, text: &str, date: NaiveDate) -> Result<()> {
        self.journal.repo::<DailyWin>().try_append(DailyWin {
            text: text.to_string(),
            date,
        })?;
        StreakTracker::new(self.journal).log_activity(
            ActivityType::Win,
            date,
            json!({ "text": text }),
        );
        Ok(())
    }

    pub fn recent_wins(&self, n: usize) -> Vec<DailyWin> {
        self.journal.repo::<DailyWin>().list_recent(n)
    }

    /// Replace the goal list for `date`
    pub fn set_goals(&self, date: NaiveDate, titles: &[String]) -> Result<()> {
        let record = DailyGoalRecord {
            date,
            goals: titles
                .iter()
                .map(|title| DailyGoal {
                    title: title.clone(),
                    completed: false,
                })
                .collect(),
        };
        self.journal
            .repo::<DailyGoalRecord>()
            .try_update(|records| {
                records.retain(|r| r.date != date);
                records.push(record);
            })
    }

    pub fn goals_on(&self, date: NaiveDate) -> Option<DailyGoalRecord> {
        self.journal
            .repo::<DailyGoalRecord>()
            .all()
            .into_iter()
            .find(|r| r.date == date)
    }

    /// Mark goal `index` (0-based) of `date` as completed and record a `goal` activity
    pub fn complete_goal(&self, date: NaiveDate, index: usize) -> Result<DailyGoal> {
        let completed = self
            .journal
            .repo::<DailyGoalRecord>()
            .try_update(|records| {
                let goal = records
                    .iter_mut()
                    .find(|r| r.date == date)
                    .and_then(|r| r.goals.get_mut(index))?;
                goal.completed = true;
                Some(goal.clone())
            })?
            .ok_or_else(|| Error::NotFound(format!("goal #{} on {}", index + 1, date)))?;

        StreakTracker::new(self.journal).log_activity(
            ActivityType::Goal,
            date,
            json!({ "title": completed.title }),
        );
        Ok(completed)
    }

    /// Completed goals over set goals for the `days` days ending on `today`
    ///
    /// Returns 0.0 when no goals were set in the window.
    pub fn goal_completion_rate(&self, today: NaiveDate, days: u32) -> f64 {
        let since = today - Duration::days(i64::from(days.max(1)) - 1);
        let (completed, total) = self
            .journal
            .repo::<DailyGoalRecord>()
            .all()
            .iter()
            .filter(|r| r.date >= since && r.date <= today)
            .fold((0usize, 0usize), |(done, total), r| {
                (done + r.completed(), total + r.goals.len())
            });

        if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        }
    }

    pub fn save_survey(&self, profile: &SurveyProfile) -> Result<()> {
        self.journal.try_save(profile)
    }

    pub fn survey(&self) -> Option<SurveyProfile> {
        self.journal.load::<SurveyProfile>()
    }

    /// Delete weigh-ins recorded on `date`
    pub fn delete_weights_on(&self, date: NaiveDate) -> Result<usize> {
        self.journal
            .repo::<WeightEntry>()
            .try_remove_where(|w| w.date == date)
    }

    /// Delete meals named `food_name` (case-insensitive) logged on `date`
    pub fn delete_meals(&self, food_name: &str, date: NaiveDate) -> Result<usize> {
        self.journal.repo::<MealEntry>().try_remove_where(|m| {
            m.timestamp.date() == date && m.food_name.eq_ignore_ascii_case(food_name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::ActivityLogEntry;
    use crate::store::{Collection, LogStore, MemoryStore};

    fn with_corrupt_activity_log() -> (Arc<MemoryStore>, Journal) {
        let store = Arc::new(MemoryStore::new());
        store.write(Collection::ActivityLog, "{corrupt").unwrap();
        let journal = Journal::new(store.clone());
        (store, journal)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_log_weight_records_activity_once_per_day() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.log_weight(182.0, at(10, 7)).unwrap();
        tracker.log_weight(181.6, at(10, 21)).unwrap();

        assert_eq!(journal.repo::<WeightEntry>().count(), 2);
        assert_eq!(tracker.latest_weight().unwrap().weight, 181.6);

        let activities = journal.repo::<ActivityLogEntry>().all();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].activity_type, ActivityType::Weight);
        assert_eq!(activities[0].payload["weight"], 182.0);
    }

    #[test]
    fn test_water_resets_on_new_day() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);

        tracker.log_water(2, at(10, 9)).unwrap();
        let log = tracker.log_water(1, at(10, 11)).unwrap();
        assert_eq!(log.cups_today, 3);
        assert_eq!(tracker.water_on(day(10)).cups_today, 3);
        assert_eq!(tracker.water_on(day(11)).cups_today, 0);

        let log = tracker.log_water(1, at(11, 8)).unwrap();
        assert_eq!(log.cups_today, 1);
        assert_eq!(log.date, day(11));
    }

    #[test]
    fn test_goals_and_completion_rate() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);

        tracker
            .set_goals(day(9), &["Walk".to_string(), "No soda".to_string()])
            .unwrap();
        tracker
            .set_goals(day(10), &["Walk".to_string(), "Log lunch".to_string()])
            .unwrap();
        tracker.complete_goal(day(9), 0).unwrap();
        tracker.complete_goal(day(10), 0).unwrap();
        tracker.complete_goal(day(10), 1).unwrap();

        assert!((tracker.goal_completion_rate(day(10), 7) - 0.75).abs() < 1e-9);
        assert_eq!(tracker.goal_completion_rate(day(10), 1), 1.0);
        assert_eq!(tracker.goal_completion_rate(day(30), 7), 0.0);

        // one goal activity per day
        let goal_days = journal
            .repo::<ActivityLogEntry>()
            .all()
            .iter()
            .filter(|a| a.activity_type == ActivityType::Goal)
            .count();
        assert_eq!(goal_days, 2);

        assert!(matches!(
            tracker.complete_goal(day(10), 5),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_set_goals_replaces_day() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.set_goals(day(9), &["A".to_string()]).unwrap();
        tracker
            .set_goals(day(9), &["B".to_string(), "C".to_string()])
            .unwrap();

        let record = tracker.goals_on(day(9)).unwrap();
        assert_eq!(record.goals.len(), 2);
        assert_eq!(journal.repo::<DailyGoalRecord>().count(), 1);
    }

    #[test]
    fn test_deletes() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.log_weight(180.0, at(9, 7)).unwrap();
        tracker.log_weight(179.0, at(10, 7)).unwrap();
        for name in ["Salad", "salad", "Soup"] {
            tracker
                .log_meal(MealEntry {
                    meal_type: "lunch".to_string(),
                    food_name: name.to_string(),
                    calories: 350,
                    timestamp: at(10, 12),
                })
                .unwrap();
        }

        assert_eq!(tracker.delete_weights_on(day(9)).unwrap(), 1);
        assert_eq!(tracker.latest_weight().unwrap().weight, 179.0);
        assert_eq!(tracker.delete_meals("SALAD", day(10)).unwrap(), 2);
        assert_eq!(tracker.meals_on(day(10)).len(), 1);
        assert_eq!(tracker.delete_meals("Soup", day(9)).unwrap(), 0);
    }

    #[test]
    fn test_wins() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.log_win("Took the stairs", day(10)).unwrap();
        tracker.log_win("Skipped dessert", day(10)).unwrap();

        let wins = tracker.recent_wins(5);
        assert_eq!(wins[0].text, "Skipped dessert");
        assert_eq!(journal.repo::<ActivityLogEntry>().count(), 1);
    }

    #[test]
    fn test_weight_saved_when_activity_log_unwritable() {
        let (store, journal) = with_corrupt_activity_log();
        let tracker = Tracker::new(&journal);

        assert!(tracker.log_weight(180.0, at(10, 7)).is_ok());
        assert_eq!(journal.repo::<WeightEntry>().count(), 1);
        assert_eq!(
            store.read(Collection::ActivityLog).unwrap().as_deref(),
            Some("{corrupt")
        );
    }

    #[test]
    fn test_win_and_goal_saved_when_activity_log_unwritable() {
        let (_store, journal) = with_corrupt_activity_log();
        let tracker = Tracker::new(&journal);

        assert!(tracker.log_win("Took the stairs", day(10)).is_ok());
        assert_eq!(tracker.recent_wins(5).len(), 1);

        tracker.set_goals(day(10), &["Walk".to_string()]).unwrap();
        let goal = tracker.complete_goal(day(10), 0).unwrap();
        assert_eq!(goal.title, "Walk");
        assert!(tracker.goals_on(day(10)).unwrap().goals[0].completed);
    }

    #[test]
    fn test_water_count_saturates() {
        let journal = Journal::in_memory();
        let tracker = Tracker::new(&journal);
        tracker.log_water(u32::MAX - 1, at(10, 9)).unwrap();
        let log = tracker.log_water(5, at(10, 10)).unwrap();
        assert_eq!(log.cups_today, u32::MAX);
    }
}
