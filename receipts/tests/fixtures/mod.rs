#![allow(dead_code)]

use receipts::model::{ItemPayload, ReceiptPayload};

pub fn item(description: &str, price: &str) -> ItemPayload {
    ItemPayload {
        short_description: Some(description.to_string()),
        price: Some(price.to_string()),
    }
}

pub fn receipt(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    items: Vec<ItemPayload>,
    total: &str,
) -> ReceiptPayload {
    ReceiptPayload {
        retailer: Some(retailer.to_string()),
        purchase_date: Some(purchase_date.to_string()),
        purchase_time: Some(purchase_time.to_string()),
        items: Some(items),
        total: Some(total.to_string()),
    }
}

/// 26 points with half-up rounding, 28 with ceiling.
pub fn target_receipt() -> ReceiptPayload {
    receipt(
        "Target",
        "2022-01-01",
        "13:01",
        vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        "35.35",
    )
}

/// 109 points under either rounding policy.
pub fn corner_market_receipt() -> ReceiptPayload {
    receipt(
        "M&M Corner Market",
        "2022-03-20",
        "14:33",
        vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
        "9.00",
    )
}

/// Every rule yields zero for this receipt.
pub fn zero_receipt() -> ReceiptPayload {
    receipt("", "2022-01-02", "09:00", vec![], "1.01")
}
