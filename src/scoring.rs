// 🏆 Points Scoring
// Fixed arithmetic rules that turn a validated receipt into loyalty points

use chrono::{Datelike, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::receipt::{Item, Receipt};

// ============================================================================
// RULE CONSTANTS
// ============================================================================

pub const ROUND_TOTAL_POINTS: u64 = 50;
pub const QUARTER_TOTAL_POINTS: u64 = 25;
pub const ITEM_PAIR_POINTS: u64 = 5;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;

/// Exclusive bounds of the afternoon bonus window (hour of day)
const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

// ============================================================================
// ITEM SCORING
// ============================================================================

/// Points for a single item.
///
/// Only descriptions whose trimmed length is a multiple of 3 score. The
/// price is scaled by 0.2, truncated to whole cents, then rounded up to the
/// next whole point.
pub fn item_points(item: &Item) -> u64 {
    let trimmed_len = item.short_description.trim().chars().count();
    if trimmed_len % 3 != 0 {
        return 0;
    }

    // cents * 0.2, truncated
    let adjusted_cents = item.price.cents() / 5;

    if adjusted_cents % 100 == 0 {
        adjusted_cents / 100
    } else {
        (adjusted_cents - adjusted_cents % 100 + 100) / 100
    }
}

// ============================================================================
// RECEIPT SCORING
// ============================================================================

/// Contribution of each rule to a receipt's score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    /// One point per alphanumeric character in the retailer name.
    /// Uses Unicode `Alphabetic`/`Numeric`, so letter-numbers such as `Ⅻ`
    /// count too; ASCII names score the same either way.
    pub retailer_name: u64,
    /// Total is a whole-dollar amount
    pub round_total: u64,
    /// Total is a multiple of 0.25
    pub quarter_total: u64,
    /// Five points for every two items
    pub item_pairs: u64,
    /// Sum of per-item description/price points
    pub item_descriptions: u64,
    /// Day of the purchase date is odd
    pub odd_day: u64,
    /// Purchased strictly between 14:00 and 16:00
    pub afternoon: u64,
}

impl PointsBreakdown {
    pub fn for_receipt(receipt: &Receipt) -> Self {
        let total_cents = receipt.total.cents();

        PointsBreakdown {
            retailer_name: receipt
                .retailer
                .chars()
                .filter(|c| c.is_alphanumeric())
                .count() as u64,
            round_total: if total_cents % 100 == 0 {
                ROUND_TOTAL_POINTS
            } else {
                0
            },
            quarter_total: if total_cents % 25 == 0 {
                QUARTER_TOTAL_POINTS
            } else {
                0
            },
            item_pairs: (receipt.items.len() as u64 / 2) * ITEM_PAIR_POINTS,
            item_descriptions: receipt
                .items
                .iter()
                .map(item_points)
                .fold(0, u64::saturating_add),
            odd_day: if receipt.purchase_date.day() % 2 == 1 {
                ODD_DAY_POINTS
            } else {
                0
            },
            afternoon: if in_afternoon_window(receipt.purchase_time) {
                AFTERNOON_POINTS
            } else {
                0
            },
        }
    }

    pub fn total(&self) -> u64 {
        [
            self.retailer_name,
            self.round_total,
            self.quarter_total,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

fn in_afternoon_window(time: NaiveTime) -> bool {
    let start = NaiveTime::from_hms_opt(AFTERNOON_START_HOUR, 0, 0);
    let end = NaiveTime::from_hms_opt(AFTERNOON_END_HOUR, 0, 0);

    matches!((start, end), (Some(start), Some(end)) if time > start && time < end)
}

/// Total points for a validated receipt
pub fn receipt_points(receipt: &Receipt) -> u64 {
    PointsBreakdown::for_receipt(receipt).total()
}

// ============================================================================
// TESTS
// ============================================================================
