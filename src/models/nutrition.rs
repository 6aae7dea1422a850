//! Daily diet log
//!
//! Meals for one day with eaten marks, calorie totals and a macro breakdown.

use serde::{Deserialize, Serialize};

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// One planned meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    /// Display label such as "07:30"
    pub time: String,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    #[serde(default)]
    pub eaten: bool,
}

impl Meal {
    pub fn new(name: &str, time: &str, calories: u32, macros: (f64, f64, f64)) -> Self {
        let (protein_g, carbs_g, fat_g) = macros;
        Self {
            name: name.to_string(),
            time: time.to_string(),
            calories,
            protein_g,
            carbs_g,
            fat_g,
            eaten: false,
        }
    }
}

/// Share of calories per macronutrient, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

/// A day's meals against a calorie goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub meals: Vec<Meal>,
    pub calorie_goal: u32,
}

impl DailyLog {
    pub fn new(meals: Vec<Meal>, calorie_goal: u32) -> Self {
        Self {
            meals,
            calorie_goal,
        }
    }

    /// Flip the eaten mark of a meal. Returns the new mark.
    pub fn toggle_eaten(&mut self, index: usize) -> Option<bool> {
        let meal = self.meals.get_mut(index)?;
        meal.eaten = !meal.eaten;
        Some(meal.eaten)
    }

    fn eaten(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter().filter(|m| m.eaten)
    }

    /// Calories of eaten meals
    pub fn total_calories(&self) -> u32 {
        self.eaten().map(|m| m.calories).sum()
    }

    /// Calories of every planned meal
    pub fn planned_calories(&self) -> u32 {
        self.meals.iter().map(|m| m.calories).sum()
    }

    /// Eaten calories as a fraction of the goal, may exceed 1.0
    pub fn goal_percentage(&self) -> f64 {
        if self.calorie_goal == 0 {
            return 0.0;
        }
        f64::from(self.total_calories()) / f64::from(self.calorie_goal)
    }

    /// Macro shares of eaten meals; all zero when nothing was eaten
    pub fn macro_breakdown(&self) -> MacroBreakdown {
        let (protein, carbs, fat) = self.eaten().fold((0.0, 0.0, 0.0), |acc, m| {
            (
                acc.0 + m.protein_g * KCAL_PER_GRAM_PROTEIN,
                acc.1 + m.carbs_g * KCAL_PER_GRAM_CARBS,
                acc.2 + m.fat_g * KCAL_PER_GRAM_FAT,
            )
        });
        let total = protein + carbs + fat;
        if total <= 0.0 {
            return MacroBreakdown::default();
        }
        MacroBreakdown {
            protein_pct: protein / total * 100.0,
            carbs_pct: carbs / total * 100.0,
            fat_pct: fat / total * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> DailyLog {
        DailyLog::new(
            vec![
                Meal::new("Oats", "07:00", 400, (20.0, 60.0, 8.0)),
                Meal::new("Chicken & rice", "12:30", 600, (45.0, 70.0, 10.0)),
            ],
            2000,
        )
    }

    #[test]
    fn test_totals_count_eaten_only() {
        let mut log = log();
        assert_eq!(log.total_calories(), 0);
        assert_eq!(log.planned_calories(), 1000);
        assert_eq!(log.toggle_eaten(0), Some(true));
        assert_eq!(log.total_calories(), 400);
        assert_eq!(log.goal_percentage(), 0.2);
        assert_eq!(log.toggle_eaten(0), Some(false));
        assert_eq!(log.total_calories(), 0);
        assert_eq!(log.toggle_eaten(9), None);
    }

    #[test]
    fn test_macro_breakdown() {
        let mut log = DailyLog::new(vec![Meal::new("Mix", "10:00", 100, (10.0, 10.0, 0.0))], 0);
        assert_eq!(log.macro_breakdown(), MacroBreakdown::default());
        log.toggle_eaten(0);
        let breakdown = log.macro_breakdown();
        assert_eq!(breakdown.protein_pct, 50.0);
        assert_eq!(breakdown.carbs_pct, 50.0);
        assert_eq!(breakdown.fat_pct, 0.0);
        assert_eq!(log.goal_percentage(), 0.0);
    }

    #[test]
    fn test_macro_breakdown_sums_to_hundred() {
        let mut log = log();
        log.toggle_eaten(0);
        log.toggle_eaten(1);
        let b = log.macro_breakdown();
        assert!((b.protein_pct + b.carbs_pct + b.fat_pct - 100.0).abs() < 1e-9);
        assert!(b.fat_pct > 0.0);
    }
}
