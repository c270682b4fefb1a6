use chrono::{DateTime, Duration, Utc};

use crate::models::summary::{MealRecord, SummaryResult};

/// Largest gap between two meals that still keeps a diet streak alive.
pub const MAX_STREAK_GAP_HOURS: i64 = 24;

/// Running state of the streak scan.
#[derive(Debug, Default, Clone, Copy)]
struct StreakScan {
    running: u64,
    best: u64,
    previous: Option<DateTime<Utc>>,
}

impl StreakScan {
    fn step(self, record: &MealRecord) -> Self {
        if !record.on_diet {
            return Self {
                running: 0,
                previous: None,
                ..self
            };
        }

        let within_gap = self
            .previous
            .map_or(true, |prev| (record.created_at - prev).abs() <= Duration::hours(MAX_STREAK_GAP_HOURS));

        // A gap too wide ends the old run; this on-diet meal opens the next one.
        let running = if within_gap { self.running + 1 } else { 1 };

        Self {
            running,
            best: self.best.max(running),
            previous: Some(record.created_at),
        }
    }
}

/// Longest run of on-diet meals where each adjacent pair is at most 24h apart.
///
/// `meals` must already be ordered by `created_at` ascending.
pub fn best_streak(meals: &[MealRecord]) -> u64 {
    meals
        .iter()
        .fold(StreakScan::default(), StreakScan::step)
        .best
}

/// Totals and best streak for one owner's meals, ordered by `created_at` ascending.
pub fn summarize(meals: &[MealRecord]) -> SummaryResult {
    let total_meals = meals.len() as u64;
    let total_on_diet = meals.iter().filter(|m| m.on_diet).count() as u64;

    SummaryResult {
        total_meals,
        total_on_diet,
        total_not_on_diet: total_meals - total_on_diet,
        best_streak: best_streak(meals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 26, 8, 0, 0).unwrap()
    }

    fn meal(on_diet: bool, at: DateTime<Utc>) -> MealRecord {
        MealRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            created_at: at,
            on_diet,
        }
    }

    fn after(hours: i64) -> DateTime<Utc> {
        t0() + Duration::hours(hours)
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(&[]), SummaryResult::default());
    }

    #[test]
    fn single_on_diet_meal() {
        let summary = summarize(&[meal(true, t0())]);
        assert_eq!(
            summary,
            SummaryResult {
                total_meals: 1,
                total_on_diet: 1,
                total_not_on_diet: 0,
                best_streak: 1,
            }
        );
    }

    #[test]
    fn off_diet_meal_splits_the_run() {
        let meals = [
            meal(true, t0()),
            meal(false, after(1)),
            meal(true, after(2)),
            meal(true, after(3)),
        ];
        let summary = summarize(&meals);
        assert_eq!(summary.total_meals, 4);
        assert_eq!(summary.total_on_diet, 3);
        assert_eq!(summary.total_not_on_diet, 1);
        assert_eq!(summary.best_streak, 2);
    }

    #[test]
    fn gap_over_a_day_restarts_the_streak() {
        let summary = summarize(&[meal(true, t0()), meal(true, after(25))]);
        assert_eq!(summary.total_on_diet, 2);
        assert_eq!(summary.best_streak, 1);
    }

    #[test]
    fn meal_after_a_wide_gap_counts_towards_the_next_run() {
        let meals = [
            meal(true, t0()),
            meal(true, after(25)),
            meal(true, after(26)),
        ];
        assert_eq!(best_streak(&meals), 2);
    }

    #[test]
    fn exactly_a_day_apart_keeps_the_streak() {
        let meals = [meal(true, t0()), meal(true, after(24)), meal(true, after(48))];
        assert_eq!(best_streak(&meals), 3);
    }

    #[test]
    fn one_second_past_a_day_breaks_the_streak() {
        let late = t0() + Duration::hours(24) + Duration::seconds(1);
        assert_eq!(best_streak(&[meal(true, t0()), meal(true, late)]), 1);
    }

    #[test]
    fn meal_after_off_diet_is_not_measured_against_it() {
        // The off-diet meal clears the marker, so the 30h gap to it is irrelevant.
        let meals = [
            meal(true, t0()),
            meal(false, after(1)),
            meal(true, after(31)),
            meal(true, after(32)),
        ];
        assert_eq!(best_streak(&meals), 2);
    }

    #[test]
    fn best_streak_is_the_maximum_not_the_last_run() {
        let meals = [
            meal(true, after(0)),
            meal(true, after(2)),
            meal(true, after(4)),
            meal(false, after(5)),
            meal(true, after(6)),
        ];
        assert_eq!(best_streak(&meals), 3);
    }

    #[test]
    fn equal_timestamps_continue_the_streak() {
        let meals = [meal(true, t0()), meal(true, t0()), meal(true, t0())];
        assert_eq!(best_streak(&meals), 3);
    }

    #[test]
    fn totals_are_consistent() {
        let meals: Vec<_> = (0..20)
            .map(|i| meal(i % 3 != 0, after(i * 7)))
            .collect();
        let summary = summarize(&meals);
        assert_eq!(
            summary.total_on_diet + summary.total_not_on_diet,
            summary.total_meals
        );
        assert!(summary.best_streak <= summary.total_on_diet);
    }

    #[test]
    fn serializes_with_response_field_names() {
        let value = serde_json::to_value(summarize(&[])).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "totalMeals": 0,
                "totalMealsOnDiet": 0,
                "totalMealsNotOnDiet": 0,
                "bestSequenceMealsOnDiet": 0,
            })
        );
    }

    #[test]
    fn raw_records_reject_bad_timestamps() {
        let id = Uuid::new_v4();
        let err = MealRecord::from_raw(id, Uuid::nil(), "not a date", true).unwrap_err();
        assert!(err.to_string().contains(&id.to_string()));

        let ok = MealRecord::from_raw(id, Uuid::nil(), "2023-04-26 08:00:00", true).unwrap();
        assert_eq!(ok.created_at, t0());
    }
}
