//! Per-food satiety and energy rankings
//!
//! Ratings are grouped by food name. Groups are ranked by mean rating
//! (descending, stable: ties keep the order in which foods first appear in
//! the newest-first history). The top list is the first five groups; the
//! bottom list is the last five, lowest first. With fewer than ten foods the
//! two lists share entries.

use crate::error::Result;
use crate::journal::Journal;
use crate::models::{EnergyRecord, SatietyRecord};

use super::types::{EnergyInsights, FoodEnergyStat, FoodSatietyStat, SatietyInsights};

const RANKED_FOODS: usize = 5;

const SATIETY_START_MESSAGE: &str =
    "Start rating how full your meals keep you to discover your most satisfying foods.";
const ENERGY_START_MESSAGE: &str =
    "Start rating your energy after meals to find the foods that fuel you best.";

/// Bounded satiety/energy history and its rankings
pub struct SatietyEnergyAnalyzer<'a> {
    journal: &'a Journal,
}

impl<'a> SatietyEnergyAnalyzer<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Prepend a satiety rating, evicting beyond 100 entries
    ///
    /// Preconditions: rating is 1-10, hours until hungry is positive.
    pub fn try_save_satiety(&self, record: SatietyRecord) -> Result<()> {
        self.journal.repo::<SatietyRecord>().try_append(record)
    }

    pub fn save_satiety(&self, record: SatietyRecord) {
        self.journal.repo::<SatietyRecord>().append(record);
    }

    /// Prepend an energy rating, evicting beyond 100 entries
    ///
    /// Preconditions: rating is 1-10, hours sustained is positive.
    pub fn try_save_energy(&self, record: EnergyRecord) -> Result<()> {
        self.journal.repo::<EnergyRecord>().try_append(record)
    }

    pub fn save_energy(&self, record: EnergyRecord) {
        self.journal.repo::<EnergyRecord>().append(record);
    }

    pub fn satiety_insights(&self) -> SatietyInsights {
        summarize_satiety(&self.journal.repo::<SatietyRecord>().all())
    }

    pub fn energy_insights(&self) -> EnergyInsights {
        summarize_energy(&self.journal.repo::<EnergyRecord>().all())
    }
}

/// Running totals for one food
struct FoodGroup {
    food_name: String,
    rating_sum: f64,
    hours_sum: f64,
    crashes: usize,
    samples: usize,
}

impl FoodGroup {
    fn mean_rating(&self) -> f64 {
        self.rating_sum / self.samples as f64
    }

    fn mean_hours(&self) -> f64 {
        self.hours_sum / self.samples as f64
    }

    fn crash_rate(&self) -> f64 {
        self.crashes as f64 / self.samples as f64 * 100.0
    }
}

/// Group `(food, rating, hours, crashed)` tuples in first-appearance order
fn group<'r>(ratings: impl Iterator<Item = (&'r str, u8, f64, bool)>) -> Vec<FoodGroup> {
    let mut groups: Vec<FoodGroup> = Vec::new();
    for (food, rating, hours, crashed) in ratings {
        let index = match groups.iter().position(|g| g.food_name == food) {
            Some(index) => index,
            None => {
                groups.push(FoodGroup {
                    food_name: food.to_string(),
                    rating_sum: 0.0,
                    hours_sum: 0.0,
                    crashes: 0,
                    samples: 0,
                });
                groups.len() - 1
            }
        };
        let g = &mut groups[index];
        g.rating_sum += f64::from(rating);
        g.hours_sum += hours;
        g.crashes += usize::from(crashed);
        g.samples += 1;
    }

    // sort_by is stable, so ties keep first-appearance order
    groups.sort_by(|a, b| b.mean_rating().total_cmp(&a.mean_rating()));
    groups
}

/// First `RANKED_FOODS` and last `RANKED_FOODS` (reversed) of a ranked list
fn top_and_bottom<T: Clone>(ranked: &[T]) -> (Vec<T>, Vec<T>) {
    let top = ranked.iter().take(RANKED_FOODS).cloned().collect();
    let bottom = ranked.iter().rev().take(RANKED_FOODS).cloned().collect();
    (top, bottom)
}

/// Rank a satiety history (newest first)
pub fn summarize_satiety(history: &[SatietyRecord]) -> SatietyInsights {
    let ranked: Vec<FoodSatietyStat> = group(
        history
            .iter()
            .map(|r| (r.food_name.as_str(), r.rating, r.hours_until_hungry, false)),
    )
    .into_iter()
    .map(|g| FoodSatietyStat {
        average_rating: g.mean_rating(),
        average_hours_until_hungry: g.mean_hours(),
        samples: g.samples,
        food_name: g.food_name,
    })
    .collect();

    let recommendation = match ranked.first() {
        None => SATIETY_START_MESSAGE.to_string(),
        Some(best) => format!(
            "{} keeps you full the longest, about {:.1} hours on average. Build more meals around it.",
            best.food_name, best.average_hours_until_hungry
        ),
    };

    let (top_foods, bottom_foods) = top_and_bottom(&ranked);
    SatietyInsights {
        top_foods,
        bottom_foods,
        recommendation,
    }
}

/// Rank an energy history (newest first)
pub fn summarize_energy(history: &[EnergyRecord]) -> EnergyInsights {
    let ranked: Vec<FoodEnergyStat> = group(history.iter().map(|r| {
        (
            r.food_name.as_str(),
            r.rating,
            r.hours_sustained,
            r.crash_experienced,
        )
    }))
    .into_iter()
    .map(|g| FoodEnergyStat {
        average_rating: g.mean_rating(),
        average_hours_sustained: g.mean_hours(),
        crash_rate: g.crash_rate(),
        samples: g.samples,
        food_name: g.food_name,
    })
    .collect();

    let recommendation = match ranked.first() {
        None => ENERGY_START_MESSAGE.to_string(),
        Some(best) => format!(
            "{} gives you about {:.1} hours of steady energy. Try it before your busiest stretch of the day.",
            best.food_name, best.average_hours_sustained
        ),
    };

    let high_energy = ranked
        .iter()
        .filter(|f| f.average_rating >= 7.0)
        .cloned()
        .collect();
    let low_energy = ranked
        .iter()
        .filter(|f| f.crash_rate > 50.0 || f.average_rating < 5.0)
        .cloned()
        .collect();

    let (top_foods, bottom_foods) = top_and_bottom(&ranked);
    EnergyInsights {
        top_foods,
        bottom_foods,
        high_energy,
        low_energy,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn satiety(food: &str, rating: u8, hours: f64) -> SatietyRecord {
        SatietyRecord {
            food_name: food.to_string(),
            rating,
            hours_until_hungry: hours,
            meal_type: "snack".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn energy(food: &str, rating: u8, hours: f64, crash: bool) -> EnergyRecord {
        EnergyRecord {
            food_name: food.to_string(),
            rating,
            hours_sustained: hours,
            meal_type: "breakfast".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            crash_experienced: crash,
        }
    }

    #[test]
    fn test_empty_history() {
        let insights = summarize_satiety(&[]);
        assert!(insights.top_foods.is_empty());
        assert!(insights.bottom_foods.is_empty());
        assert_eq!(insights.recommendation, SATIETY_START_MESSAGE);

        let insights = summarize_energy(&[]);
        assert!(insights.high_energy.is_empty());
        assert_eq!(insights.recommendation, ENERGY_START_MESSAGE);
    }

    #[test]
    fn test_apple_beats_chips() {
        let history = vec![
            satiety("apple", 9, 3.0),
            satiety("chips", 2, 1.0),
            satiety("apple", 9, 4.0),
            satiety("chips", 2, 0.5),
            satiety("apple", 9, 5.0),
        ];
        let insights = summarize_satiety(&history);

        let top = &insights.top_foods[0];
        assert_eq!(top.food_name, "apple");
        assert_eq!(top.average_rating, 9.0);
        assert_eq!(top.average_hours_until_hungry, 4.0);
        assert_eq!(top.samples, 3);

        let bottom = &insights.bottom_foods[0];
        assert_eq!(bottom.food_name, "chips");
        assert_eq!(bottom.average_rating, 2.0);
        assert_eq!(bottom.average_hours_until_hungry, 0.75);

        // fewer than ten foods: both lists hold both foods
        assert_eq!(insights.top_foods.len(), 2);
        assert_eq!(insights.bottom_foods.len(), 2);
        assert!(insights.recommendation.contains("apple"));
        assert!(insights.recommendation.contains("4.0 hours"));
    }

    #[test]
    fn test_bottom_list_is_lowest_first() {
        let history: Vec<_> = (1..=8)
            .map(|rating| satiety(&format!("food{}", rating), rating, 2.0))
            .collect();
        let insights = summarize_satiety(&history);

        let top: Vec<_> = insights.top_foods.iter().map(|f| f.food_name.as_str()).collect();
        assert_eq!(top, vec!["food8", "food7", "food6", "food5", "food4"]);

        let bottom: Vec<_> = insights
            .bottom_foods
            .iter()
            .map(|f| f.food_name.as_str())
            .collect();
        assert_eq!(bottom, vec!["food1", "food2", "food3", "food4", "food5"]);
    }

    #[test]
    fn test_ties_keep_most_recent_first() {
        let history = vec![
            satiety("eggs", 7, 3.0),
            satiety("oats", 7, 4.0),
            satiety("toast", 7, 2.0),
        ];
        let insights = summarize_satiety(&history);
        let names: Vec<_> = insights.top_foods.iter().map(|f| f.food_name.as_str()).collect();
        assert_eq!(names, vec!["eggs", "oats", "toast"]);
    }

    #[test]
    fn test_energy_predicates_are_independent() {
        let history = vec![
            energy("coffee", 8, 2.0, true),
            energy("coffee", 8, 2.0, true),
            energy("coffee", 7, 1.0, false),
            energy("oatmeal", 8, 4.0, false),
            energy("donut", 3, 0.5, true),
            energy("salad", 5, 3.0, false),
        ];
        let insights = summarize_energy(&history);

        let high: Vec<_> = insights.high_energy.iter().map(|f| f.food_name.as_str()).collect();
        let low: Vec<_> = insights.low_energy.iter().map(|f| f.food_name.as_str()).collect();

        // coffee rates well but crashes two times out of three
        assert!(high.contains(&"coffee"));
        assert!(low.contains(&"coffee"));
        assert!(high.contains(&"oatmeal"));
        assert!(low.contains(&"donut"));
        assert!(!low.contains(&"salad"));
        assert!(!high.contains(&"salad"));

        let coffee = insights
            .top_foods
            .iter()
            .find(|f| f.food_name == "coffee")
            .unwrap();
        assert!((coffee.crash_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(insights.top_foods[0].food_name, "oatmeal");
    }

    #[test]
    fn test_analyzer_round_trip_through_journal() {
        let journal = Journal::in_memory();
        let analyzer = SatietyEnergyAnalyzer::new(&journal);
        analyzer.save_satiety(satiety("apple", 9, 3.0));
        analyzer.save_satiety(satiety("chips", 2, 1.0));
        analyzer.save_energy(energy("oatmeal", 8, 4.0, false));

        assert_eq!(analyzer.satiety_insights().top_foods[0].food_name, "apple");
        assert_eq!(analyzer.energy_insights().high_energy.len(), 1);
    }
}
