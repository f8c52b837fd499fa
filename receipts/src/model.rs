use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use processing::{error::ValidationError, model::Importable};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("amount pattern is valid"));
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is valid"));
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("time pattern is valid"));

const AMOUNT_FORMAT: &str = "an amount with exactly two decimal places, e.g. \"6.49\"";
const DATE_FORMAT: &str = "a calendar date as YYYY-MM-DD";
const TIME_FORMAT: &str = "a 24-hour time as HH:MM";

/// Line item exactly as received. Every field is optional so that a missing
/// field is reported by name instead of as a generic JSON error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Receipt exactly as received on `POST /receipts/process`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub short_description: String,
    pub price: Decimal,
}

/// A structurally valid receipt. Only values of this type are ever scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<Item>,
    pub total: Decimal,
}

fn required<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, ValidationError> {
    value
        .as_deref()
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))
}

/// Parses a monetary amount as exact fixed point. Exactly two fractional
/// digits are required; signs, exponents and thousands separators are not
/// accepted.
pub fn parse_amount(field: &str, value: &str) -> Result<Decimal, ValidationError> {
    if !AMOUNT_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_format(field, value, AMOUNT_FORMAT));
    }
    Decimal::from_str_exact(value)
        .map_err(|_| ValidationError::invalid_format(field, value, AMOUNT_FORMAT))
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_format(field, value, DATE_FORMAT));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::invalid_format(field, value, DATE_FORMAT))
}

pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_PATTERN.is_match(value) {
        return Err(ValidationError::invalid_format(field, value, TIME_FORMAT));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ValidationError::invalid_format(field, value, TIME_FORMAT))
}

impl ItemPayload {
    fn validate_at(&self, index: usize) -> Result<Item, ValidationError> {
        let description_field = format!("items[{index}].shortDescription");
        let price_field = format!("items[{index}].price");

        let short_description = required(&description_field, &self.short_description)?;
        let price = parse_amount(&price_field, required(&price_field, &self.price)?)?;

        Ok(Item {
            short_description: short_description.to_string(),
            price,
        })
    }
}

impl Importable for ReceiptPayload {
    type Validated = Receipt;

    fn validate(&self) -> Result<Receipt, ValidationError> {
        let retailer = required("retailer", &self.retailer)?;
        let purchase_date = parse_date("purchaseDate", required("purchaseDate", &self.purchase_date)?)?;
        let purchase_time = parse_time("purchaseTime", required("purchaseTime", &self.purchase_time)?)?;
        let items = self
            .items
            .as_ref()
            .ok_or_else(|| ValidationError::MissingField("items".to_string()))?
            .iter()
            .enumerate()
            .map(|(index, item)| item.validate_at(index))
            .collect::<Result<Vec<_>, _>>()?;
        let total = parse_amount("total", required("total", &self.total)?)?;

        Ok(Receipt {
            retailer: retailer.to_string(),
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }
}
