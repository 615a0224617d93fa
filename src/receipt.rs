// 🧾 Receipt Model
// Wire shapes (as submitted) and validated receipts (as scored)

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

// ============================================================================
// PRICE PARSING
// ============================================================================

/// Amounts: ASCII digits, a dot, exactly two fraction digits
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("invalid amount pattern"));

pub fn is_amount(text: &str) -> bool {
    AMOUNT_PATTERN.is_match(text)
}

/// Convert a `D+.DD` amount into integer cents.
///
/// No rounding happens here: the two fraction digits are exact cents.
/// Callers are expected to have pattern-checked the text already, but a
/// malformed or oversized amount still comes back as an error.
pub fn price_to_cents(text: &str) -> Result<u64> {
    let (whole, fraction) = text
        .split_once('.')
        .ok_or_else(|| anyhow!("amount {:?} has no decimal point", text))?;

    if fraction.len() != 2 {
        return Err(anyhow!("amount {:?} must have exactly two fraction digits", text));
    }

    let whole: u64 = whole
        .parse()
        .with_context(|| format!("invalid whole part in amount {:?}", text))?;
    let fraction: u64 = fraction
        .parse()
        .with_context(|| format!("invalid fraction part in amount {:?}", text))?;

    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or_else(|| anyhow!("amount {:?} is too large", text))
}

/// A currency amount that keeps its submitted text next to its cent value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    text: String,
    cents: u64,
}

impl Price {
    /// Parse a `D+.DD` amount, rejecting anything that is not exactly that shape
    pub fn parse(text: &str) -> Result<Self> {
        if !is_amount(text) {
            return Err(anyhow!("amount {:?} does not match D+.DD", text));
        }

        let cents = price_to_cents(text)?;
        Ok(Price {
            text: text.to_string(),
            cents,
        })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// WIRE SHAPES
// ============================================================================

/// Receipt exactly as it arrives in a request body.
///
/// Every field is required; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<RawItem>,
    pub total: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub short_description: String,
    pub price: String,
}

// ============================================================================
// VALIDATED RECEIPT
// ============================================================================

/// One line entry of a validated receipt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub short_description: String,
    pub price: Price,
}

/// A receipt that has passed validation and can be scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<Item>,
    pub total: Price,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_to_cents() {
        assert_eq!(price_to_cents("50.00").unwrap(), 5000);
        assert_eq!(price_to_cents("6.49").unwrap(), 649);
        assert_eq!(price_to_cents("0.01").unwrap(), 1);
        assert_eq!(price_to_cents("0.00").unwrap(), 0);
    }

    #[test]
    fn test_price_to_cents_rejects_malformed() {
        assert!(price_to_cents("50").is_err());
        assert!(price_to_cents("50.0").is_err());
        assert!(price_to_cents("abc.de").is_err());
        assert!(price_to_cents("99999999999999999999.00").is_err());
    }

    #[test]
    fn test_price_parse_keeps_text() {
        let price = Price::parse("12.25").unwrap();

        assert_eq!(price.cents(), 1225);
        assert_eq!(price.as_str(), "12.25");
        assert_eq!(price.to_string(), "12.25");
    }

    #[test]
    fn test_price_parse_rejects_wrong_precision() {
        assert!(Price::parse("12.5").is_err());
        assert!(Price::parse("12.500").is_err());
        assert!(Price::parse(".50").is_err());
        assert!(Price::parse("-1.00").is_err());
        assert!(Price::parse(" 1.00").is_err());
    }

    #[test]
    fn test_raw_receipt_uses_camel_case_fields() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [{"shortDescription": "Mountain Dew 12PK", "price": "6.49"}],
            "total": "6.49",
            "extra": true
        }"#;

        let raw: RawReceipt = serde_json::from_str(json).unwrap();

        assert_eq!(raw.purchase_date, "2022-01-01");
        assert_eq!(raw.items[0].short_description, "Mountain Dew 12PK");
    }

    #[test]
    fn test_raw_receipt_requires_every_field() {
        let json = r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": []
        }"#;

        assert!(serde_json::from_str::<RawReceipt>(json).is_err());
    }
}
