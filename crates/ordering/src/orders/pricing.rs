//! Pure order pricing: total cost and discount selection.
//!
//! No I/O and no mutation; prices arrive already resolved. Discounts are
//! chosen by precedence - birthday beats lunch, first match wins, never
//! stacked.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use pronto_core::{MenuItemId, Price};

use crate::config::DiscountConfig;

/// Discount applied when the order lands near the customer's birthday.
pub const BIRTHDAY_DISCOUNT_PERCENT: u8 = 15;

/// Discount applied during the lunch window.
pub const LUNCH_DISCOUNT_PERCENT: u8 = 10;

/// One cart line with its catalog price resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub item_id: MenuItemId,
    pub amount: u32,
    pub unit_price: Price,
}

/// Windows governing discount eligibility.
///
/// Hour-granular lunch window, start inclusive and end exclusive; the
/// birthday window covers `birthday_window_days` days starting today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPolicy {
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,
    pub birthday_window_days: i64,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::from(DiscountConfig::default())
    }
}

impl From<DiscountConfig> for DiscountPolicy {
    fn from(config: DiscountConfig) -> Self {
        Self {
            lunch_start_hour: config.lunch_start_hour,
            lunch_end_hour: config.lunch_end_hour,
            birthday_window_days: config.birthday_window_days,
        }
    }
}

/// Result of pricing a cart: total cost before discount plus the chosen
/// discount percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub cost: Price,
    pub discount_percent: u8,
}

/// Price an order.
///
/// `cost` is the sum of `amount * unit_price` over all lines. The discount
/// is selected by precedence, first match wins:
///
/// 1. birthday ([`BIRTHDAY_DISCOUNT_PERCENT`]) - the customer's birthday
///    (month/day) falls within the policy's window starting today
/// 2. lunch ([`LUNCH_DISCOUNT_PERCENT`]) - `now` is inside the lunch window
/// 3. none
#[must_use]
pub fn quote(
    lines: &[PricedLine],
    birth_date: Option<NaiveDate>,
    now: NaiveDateTime,
    policy: &DiscountPolicy,
) -> Quote {
    let cost = lines
        .iter()
        .map(|line| line.unit_price.line_total(line.amount))
        .sum();

    let discount_percent = if birth_date
        .is_some_and(|birth| birthday_within_window(birth, now.date(), policy.birthday_window_days))
    {
        BIRTHDAY_DISCOUNT_PERCENT
    } else if in_lunch_window(now, policy) {
        LUNCH_DISCOUNT_PERCENT
    } else {
        0
    };

    Quote {
        cost,
        discount_percent,
    }
}

fn in_lunch_window(now: NaiveDateTime, policy: &DiscountPolicy) -> bool {
    let hour = now.hour();
    policy.lunch_start_hour <= hour && hour < policy.lunch_end_hour
}

/// Whether the next occurrence of the birth month/day falls within the
/// `window_days`-day window starting today.
fn birthday_within_window(birth: NaiveDate, today: NaiveDate, window_days: i64) -> bool {
    let days_until = (next_occurrence(birth, today) - today).num_days();
    days_until < window_days
}

/// This year's occurrence of the birth month/day, or next year's when it
/// has already passed.
fn next_occurrence(birth: NaiveDate, today: NaiveDate) -> NaiveDate {
    let this_year = occurrence_in(birth, today.year());
    if this_year < today {
        occurrence_in(birth, today.year() + 1)
    } else {
        this_year
    }
}

/// Feb 29 birthdays observe Mar 1 in non-leap years.
fn occurrence_in(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(birth)
}
