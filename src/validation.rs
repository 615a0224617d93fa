// 📐 Receipt Validation
// Turns a submitted receipt into a scoreable one, or says which field broke

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::receipt::{Item, Price, RawItem, RawReceipt, Receipt};

// ============================================================================
// PATTERNS
// ============================================================================

/// Retailer names and item descriptions: word characters, whitespace, `-`, `&`
static TEXT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\s\-&]+$").expect("invalid text pattern"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("invalid date pattern"));

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}(:[0-9]{2})?$").expect("invalid time pattern")
});

pub fn is_valid_text(text: &str) -> bool {
    TEXT_PATTERN.is_match(text)
}

// ============================================================================
// FIELD PARSERS
// ============================================================================

fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_PATTERN.is_match(text) {
        return Err(ValidationError::PurchaseDate(text.to_string()));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ValidationError::PurchaseDate(text.to_string()))
}

/// Accepts `HH:MM` and `HH:MM:SS`
fn parse_time(text: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_PATTERN.is_match(text) {
        return Err(ValidationError::PurchaseTime(text.to_string()));
    }

    let format = if text.len() == 5 { "%H:%M" } else { "%H:%M:%S" };
    NaiveTime::parse_from_str(text, format)
        .map_err(|_| ValidationError::PurchaseTime(text.to_string()))
}

fn validate_item(index: usize, raw: RawItem) -> Result<Item, ValidationError> {
    if !is_valid_text(&raw.short_description) {
        return Err(ValidationError::ShortDescription {
            index,
            value: raw.short_description,
        });
    }

    let price = match Price::parse(&raw.price) {
        Ok(price) => price,
        Err(_) => {
            return Err(ValidationError::Price {
                index,
                value: raw.price,
            })
        }
    };

    Ok(Item {
        short_description: raw.short_description,
        price,
    })
}

// ============================================================================
// RECEIPT VALIDATION
// ============================================================================

/// Validate a submitted receipt.
///
/// Stops at the first violated constraint; nothing is scored for a receipt
/// that fails here.
pub fn validate(raw: RawReceipt) -> Result<Receipt, ValidationError> {
    if !is_valid_text(&raw.retailer) {
        return Err(ValidationError::Retailer(raw.retailer));
    }

    let purchase_date = parse_date(&raw.purchase_date)?;
    let purchase_time = parse_time(&raw.purchase_time)?;

    if raw.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let items = raw
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let total =
        Price::parse(&raw.total).map_err(|_| ValidationError::Total(raw.total.clone()))?;

    Ok(Receipt {
        retailer: raw.retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

/// Deserialize a JSON request body and validate it in one step
pub fn parse_receipt(body: &[u8]) -> Result<Receipt, ValidationError> {
    let raw: RawReceipt =
        serde_json::from_slice(body).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    validate(raw)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::is_amount;

    fn raw_target() -> RawReceipt {
        RawReceipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                RawItem {
                    short_description: "Mountain Dew 12PK".to_string(),
                    price: "6.49".to_string(),
                },
                RawItem {
                    short_description: "   Klarbrunn 12-PK 12 FL OZ  ".to_string(),
                    price: "12.00".to_string(),
                },
            ],
            total: "18.49".to_string(),
        }
    }

    #[test]
    fn test_text_pattern() {
        assert!(is_valid_text("M&M Corner Market"));
        assert!(is_valid_text("Klarbrunn 12-PK 12 FL OZ"));
        assert!(is_valid_text("snake_case"));
        assert!(!is_valid_text(""));
        assert!(!is_valid_text("Walgreens!"));
        assert!(!is_valid_text("Price: $5"));
    }

    #[test]
    fn test_amount_pattern() {
        assert!(is_amount("0.00"));
        assert!(is_amount("123.45"));
        assert!(!is_amount("123.4"));
        assert!(!is_amount("123"));
        assert!(!is_amount("1,000.00"));
        assert!(!is_amount("1.00\n"));
    }

    #[test]
    fn test_valid_receipt() {
        let receipt = validate(raw_target()).unwrap();

        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(receipt.purchase_time, NaiveTime::from_hms_opt(13, 1, 0).unwrap());
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[1].price.cents(), 1200);
        assert_eq!(receipt.total.cents(), 1849);
    }

    #[test]
    fn test_empty_retailer_rejected() {
        let mut raw = raw_target();
        raw.retailer = String::new();

        assert_eq!(validate(raw), Err(ValidationError::Retailer(String::new())));
    }

    #[test]
    fn test_no_items_rejected() {
        let mut raw = raw_target();
        raw.items.clear();

        assert_eq!(validate(raw), Err(ValidationError::NoItems));
    }

    #[test]
    fn test_bad_item_reports_index() {
        let mut raw = raw_target();
        raw.items[1].price = "12.0".to_string();

        assert_eq!(
            validate(raw),
            Err(ValidationError::Price {
                index: 1,
                value: "12.0".to_string()
            })
        );

        let mut raw = raw_target();
        raw.items[0].short_description = "Dew!".to_string();

        assert!(matches!(
            validate(raw),
            Err(ValidationError::ShortDescription { index: 0, .. })
        ));
    }

    #[test]
    fn test_bad_total_rejected() {
        let mut raw = raw_target();
        raw.total = "18.5".to_string();

        assert_eq!(validate(raw), Err(ValidationError::Total("18.5".to_string())));
    }

    #[test]
    fn test_dates() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("2024-4-9").is_err());
        assert!(parse_date("04/09/2024").is_err());
    }

    #[test]
    fn test_times() {
        assert_eq!(parse_time("14:01").unwrap(), NaiveTime::from_hms_opt(14, 1, 0).unwrap());
        assert_eq!(
            parse_time("14:00:30").unwrap(),
            NaiveTime::from_hms_opt(14, 0, 30).unwrap()
        );
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("2:30").is_err());
        assert!(parse_time("14:61").is_err());
        assert!(parse_time("2pm").is_err());
    }

    #[test]
    fn test_parse_receipt_malformed_json() {
        assert!(matches!(
            parse_receipt(b"{not json"),
            Err(ValidationError::Malformed(_))
        ));
        assert!(matches!(
            parse_receipt(br#"{"retailer": "Target"}"#),
            Err(ValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_receipt_numeric_price_rejected() {
        let body = br#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "items": [{"shortDescription": "Pepsi", "price": 1.25}],
            "total": "1.25"
        }"#;

        assert!(matches!(parse_receipt(body), Err(ValidationError::Malformed(_))));
    }
}
