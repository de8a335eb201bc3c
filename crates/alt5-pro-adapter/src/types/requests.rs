/*
[INPUT]:  Order parameters from callers
[OUTPUT]: Request bodies in the exchange's PascalCase wire shape
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::Serialize;

use super::enums::{Side, TimeInForce};

/// Order to be placed on an account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewOrder {
    pub instrument: String,
    #[serde(rename = "Type")]
    pub side: Side,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub is_limit: bool,
    pub is_stop: bool,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub activation_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
}

impl NewOrder {
    /// Limit order at `price`
    pub fn limit(instrument: impl Into<String>, side: Side, amount: Decimal, price: Decimal) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            amount,
            is_limit: true,
            is_stop: false,
            activation_price: None,
            price: Some(price),
            time_in_force: None,
        }
    }

    /// Market order
    pub fn market(instrument: impl Into<String>, side: Side, amount: Decimal) -> Self {
        Self {
            instrument: instrument.into(),
            side,
            amount,
            is_limit: false,
            is_stop: false,
            activation_price: None,
            price: None,
            time_in_force: None,
        }
    }

    /// Turn the order into a stop order triggered at `activation_price`
    pub fn with_stop(mut self, activation_price: Decimal) -> Self {
        self.is_stop = true;
        self.activation_price = Some(activation_price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }
}

/// Body of `POST /api/{account_id}/order`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "Order")]
    pub order: NewOrder,
}

impl From<NewOrder> for CreateOrderRequest {
    fn from(mut order: NewOrder) -> Self {
        // Price is only meaningful for limit orders.
        if !order.is_limit {
            order.price = None;
        }
        Self { order }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoFactorRequest {
    #[serde(rename = "VerificationCode")]
    pub verification_code: String,
}
