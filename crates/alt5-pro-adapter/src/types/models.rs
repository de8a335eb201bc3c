/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs decoded from ALT5 responses
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "serde_helpers::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(deserialize_with = "serde_helpers::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub asset_id: String,
    #[serde(default)]
    pub available: Decimal,
    #[serde(default)]
    pub order_locked: Decimal,
    #[serde(default)]
    pub transfer_locked: Decimal,
}

/// Open order as listed by `GET /api/{account_id}/orders/my`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    #[serde(deserialize_with = "serde_helpers::deserialize_id")]
    pub id: String,
    pub instrument: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub amount: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    pub amount: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub instrument: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub ask_total_amount: Decimal,
    #[serde(default)]
    pub bid_total_amount: Decimal,
    #[serde(default)]
    pub snapshot: bool,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.iter().max_by(|a, b| a.price.cmp(&b.price))
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.iter().min_by(|a, b| a.price.cmp(&b.price))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub instrument: String,
    pub start: String,
    pub end: String,
    pub low: Decimal,
    pub high: Decimal,
    pub volume: Decimal,
    pub open: Decimal,
    pub close: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTrade {
    pub trade_id: i64,
    pub trade_time: String,
    pub amount: Decimal,
    pub execution_price: Decimal,
    pub instrument: String,
    /// 0 = buy, 1 = sell
    pub side: u8,
}

impl PublicTrade {
    pub fn taker_side(&self) -> Side {
        if self.side == 0 { Side::Buy } else { Side::Sell }
    }
}

/// Instrument name split into its assets, e.g. `xrp_usd`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument: String,
    pub base_asset: String,
    pub quote_asset: String,
}

impl Instrument {
    pub fn parse(name: &str) -> Self {
        let (base, quote) = name.split_once('_').unwrap_or((name, ""));
        Self {
            instrument: name.to_string(),
            base_asset: base.to_string(),
            quote_asset: quote.to_string(),
        }
    }
}

mod serde_helpers {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        crate::types::responses::value_as_id(&value)
            .ok_or_else(|| serde::de::Error::custom("id must be a non-empty string or number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn account_accepts_numeric_id_and_unknown_fields() {
        let account: Account = serde_json::from_value(json!({
            "id": 1001,
            "name": "main",
            "ownerId": "u-1"
        }))
        .expect("account should deserialize");

        assert_eq!(account.id, "1001");
        assert_eq!(account.name.as_deref(), Some("main"));
    }

    #[test]
    fn open_order_deserializes_numbers_and_strings() {
        let order: OpenOrder = serde_json::from_value(json!({
            "id": "o-1",
            "instrument": "xrp_usd",
            "type": "buy",
            "amount": 1.0,
            "price": "0.01"
        }))
        .expect("order should deserialize");

        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.price, Some(Decimal::from_str("0.01").unwrap()));
    }

    #[test]
    fn order_book_best_levels() {
        let book: OrderBook = serde_json::from_value(json!({
            "instrument": "btc_usd",
            "bids": [{"amount": 1, "price": 99.5}, {"amount": 2, "price": 99.9}],
            "asks": [{"amount": 1, "price": 100.4}, {"amount": 1, "price": 100.1}]
        }))
        .expect("book should deserialize");

        assert_eq!(book.best_bid().unwrap().price, Decimal::from_str("99.9").unwrap());
        assert_eq!(book.best_ask().unwrap().price, Decimal::from_str("100.1").unwrap());
    }

    #[test]
    fn instrument_parse_splits_assets() {
        let instrument = Instrument::parse("xrp_usd");
        assert_eq!(instrument.base_asset, "xrp");
        assert_eq!(instrument.quote_asset, "usd");
    }
}
