//! Synthetic entries for demos and tests.
//!
//! The category of a generated entry always agrees with the sign of its
//! price: income-like categories for `price >= 0`, any other one otherwise.

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::{Category, EngineError, ResultEngine, entries::ResolvedEntry, util::ensure_ordered};

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Default historical window, both ends excluded.
pub const WINDOW_START: NaiveDate = ymd(2020, 1, 1);
pub const WINDOW_END: NaiveDate = ymd(2021, 1, 1);

/// Default price bounds, both ends included.
pub const MIN_PRICE: i32 = -500;
pub const MAX_PRICE: i32 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomEntryGenerator {
    from: NaiveDate,
    to: NaiveDate,
    min_price: i32,
    max_price: i32,
}

impl Default for RandomEntryGenerator {
    fn default() -> Self {
        Self {
            from: WINDOW_START,
            to: WINDOW_END,
            min_price: MIN_PRICE,
            max_price: MAX_PRICE,
        }
    }
}

impl RandomEntryGenerator {
    /// Replace the date window. At least one day must lie strictly between
    /// `from` and `to`.
    pub fn with_window(mut self, from: NaiveDate, to: NaiveDate) -> ResultEngine<Self> {
        if (to - from).num_days() < 2 {
            return Err(EngineError::InvalidRange(format!(
                "no day lies strictly between {from} and {to}"
            )));
        }
        self.from = from;
        self.to = to;
        Ok(self)
    }

    pub fn with_price_range(mut self, min_price: i32, max_price: i32) -> ResultEngine<Self> {
        ensure_ordered(min_price, max_price, "price")?;
        self.min_price = min_price;
        self.max_price = max_price;
        Ok(self)
    }

    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        (self.from, self.to)
    }

    pub fn price_range(&self) -> (i32, i32) {
        (self.min_price, self.max_price)
    }

    /// Generate an entry using the thread-local RNG.
    pub fn generate(&self) -> ResultEngine<ResolvedEntry> {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ResultEngine<ResolvedEntry> {
        let date = self.random_date(rng)?;
        let price = rng.gen_range(self.min_price..=self.max_price);
        Ok(ResolvedEntry {
            price,
            name: date.format("%Y-%m-%d").to_string(),
            date,
            category: category_for_price(price, rng),
        })
    }

    fn random_date<R: Rng + ?Sized>(&self, rng: &mut R) -> ResultEngine<NaiveDate> {
        let span = (self.to - self.from).num_days();
        let offset = rng.gen_range(1..span);
        self.from
            .checked_add_days(Days::new(offset.unsigned_abs()))
            .filter(|date| *date < self.to)
            .ok_or_else(|| {
                EngineError::InvalidRange(format!(
                    "{offset} days after {} is outside the window",
                    self.from
                ))
            })
    }
}

/// Pick a category matching the sign of `price`, uniformly within its set.
pub fn category_for_price<R: Rng + ?Sized>(price: i32, rng: &mut R) -> Category {
    if price >= 0 {
        Category::INCOME[rng.gen_range(0..Category::INCOME.len())]
    } else {
        let expenses = Category::expense_categories();
        expenses[rng.gen_range(0..expenses.len())]
    }
}
