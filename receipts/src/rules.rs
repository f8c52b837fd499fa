//! The seven receipt rules.
//!
//! Every rule reads the same validated [`Receipt`] and awards points on its
//! own; the score is the plain sum. Monetary checks use exact fixed-point
//! decimals, never floats.
//!
//! | Rule | Award |
//! |---|---|
//! | `retailer_name` | 1 per alphanumeric character of the retailer |
//! | `round_total` | 50 when the total has no cents |
//! | `quarter_multiple` | 25 when the total is a multiple of 0.25 |
//! | `item_pairs` | 5 per two items |
//! | `description_length` | `price * 0.2`, rounded per [`DescriptionRounding`], for every item whose trimmed description length is a multiple of 3 |
//! | `odd_day` | 6 when the day of the purchase date is odd |
//! | `afternoon_window` | 10 when the purchase hour is 14 or 15 |
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use processing::{
    model::{Points, ScorerResult},
    scorers::{RuleBasedScorer, Scorer, total_score},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::model::{Item, Receipt};

pub use common::config::DescriptionRounding;

pub const RETAILER_NAME: &str = "retailer_name";
pub const ROUND_TOTAL: &str = "round_total";
pub const QUARTER_MULTIPLE: &str = "quarter_multiple";
pub const ITEM_PAIRS: &str = "item_pairs";
pub const DESCRIPTION_LENGTH: &str = "description_length";
pub const ODD_DAY: &str = "odd_day";
pub const AFTERNOON_WINDOW: &str = "afternoon_window";

pub const ROUND_TOTAL_POINTS: Points = 50;
pub const QUARTER_MULTIPLE_POINTS: Points = 25;
pub const ITEM_PAIR_POINTS: Points = 5;
pub const ODD_DAY_POINTS: Points = 6;
pub const AFTERNOON_WINDOW_POINTS: Points = 10;

/// `[start, end)` in whole hours.
pub const AFTERNOON_WINDOW_HOURS: (u32, u32) = (14, 16);
pub const DESCRIPTION_LENGTH_DIVISOR: usize = 3;

fn quarter() -> Decimal {
    Decimal::new(25, 2)
}

fn description_multiplier() -> Decimal {
    Decimal::new(2, 1)
}

pub fn retailer_name_points(retailer: &str) -> Points {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as Points
}

pub fn round_total_points(total: Decimal) -> Points {
    if total.fract().is_zero() { ROUND_TOTAL_POINTS } else { 0 }
}

pub fn quarter_multiple_points(total: Decimal) -> Points {
    if (total % quarter()).is_zero() { QUARTER_MULTIPLE_POINTS } else { 0 }
}

pub fn item_pair_points(item_count: usize) -> Points {
    ((item_count / 2) as Points).saturating_mul(ITEM_PAIR_POINTS)
}

/// An empty trimmed description has length 0, which counts as a multiple of 3.
pub fn description_points(item: &Item, rounding: DescriptionRounding) -> Points {
    let length = item.short_description.trim().chars().count();
    if length % DESCRIPTION_LENGTH_DIVISOR != 0 {
        return 0;
    }

    let award = item.price.saturating_mul(description_multiplier());
    let rounded = match rounding {
        DescriptionRounding::HalfUp => {
            award.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
        DescriptionRounding::Ceiling => award.ceil(),
    };
    rounded.to_u64().unwrap_or(0)
}

pub fn odd_day_points(date: NaiveDate) -> Points {
    if date.day() % 2 == 1 { ODD_DAY_POINTS } else { 0 }
}

pub fn afternoon_window_points(time: NaiveTime) -> Points {
    let (start, end) = AFTERNOON_WINDOW_HOURS;
    if (start..end).contains(&time.hour()) {
        AFTERNOON_WINDOW_POINTS
    } else {
        0
    }
}

fn award(name: &str, score: Points) -> Option<ScorerResult> {
    Some(ScorerResult {
        name: name.to_string(),
        score,
    })
}

pub fn get_rule_based_scorer(rounding: DescriptionRounding) -> RuleBasedScorer<Receipt> {
    let mut scorer = RuleBasedScorer::new();

    scorer.add_rule(|receipt: &Receipt| award(RETAILER_NAME, retailer_name_points(&receipt.retailer)));
    scorer.add_rule(|receipt: &Receipt| award(ROUND_TOTAL, round_total_points(receipt.total)));
    scorer.add_rule(|receipt: &Receipt| award(QUARTER_MULTIPLE, quarter_multiple_points(receipt.total)));
    scorer.add_rule(|receipt: &Receipt| award(ITEM_PAIRS, item_pair_points(receipt.items.len())));
    scorer.add_rule(move |receipt: &Receipt| {
        let points = receipt
            .items
            .iter()
            .map(|item| description_points(item, rounding))
            .fold(0, |total: Points, points| total.saturating_add(points));
        award(DESCRIPTION_LENGTH, points)
    });
    scorer.add_rule(|receipt: &Receipt| award(ODD_DAY, odd_day_points(receipt.purchase_date)));
    scorer.add_rule(|receipt: &Receipt| {
        award(AFTERNOON_WINDOW, afternoon_window_points(receipt.purchase_time))
    });

    scorer
}

/// Per-rule awards, omitting rules that awarded nothing.
pub fn breakdown(receipt: &Receipt, rounding: DescriptionRounding) -> Vec<ScorerResult> {
    get_rule_based_scorer(rounding).score(receipt)
}

pub fn evaluate_with(receipt: &Receipt, rounding: DescriptionRounding) -> Points {
    total_score(&breakdown(receipt, rounding))
}

/// Scores a receipt with the default [`DescriptionRounding::HalfUp`] policy.
pub fn evaluate(receipt: &Receipt) -> Points {
    evaluate_with(receipt, DescriptionRounding::default())
}
