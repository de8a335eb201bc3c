/*
[INPUT]:  Instrument identifiers
[OUTPUT]: Market data (instruments, order book, trades, ticker)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{Alt5Client, Alt5Error, Result};
use crate::types::{Instrument, OrderBook, PublicTrade, Ticker};

impl Alt5Client {
    /// List tradable instruments
    ///
    /// GET /marketdata/instruments
    pub async fn get_instruments(&self) -> Result<Vec<Instrument>> {
        let names: Vec<String> = self
            .marketdata_get("/instruments")
            .await?
            .error_for_status()?
            .decode()?;
        Ok(names.iter().map(|name| Instrument::parse(name)).collect())
    }

    /// Order book depth for an instrument
    ///
    /// GET /marketdata/api/v2/marketdata/depth/{instrument}
    pub async fn get_order_book(&self, instrument: &str) -> Result<OrderBook> {
        let endpoint = format!("/api/v2/marketdata/depth/{}", instrument);
        self.marketdata_get(&endpoint)
            .await?
            .error_for_status()?
            .decode()
    }

    /// Recent public trades for an instrument
    ///
    /// GET /marketdata/api/v2/marketdata/trades/{instrument}
    pub async fn get_recent_trades(&self, instrument: &str) -> Result<Vec<PublicTrade>> {
        let endpoint = format!("/api/v2/marketdata/trades/{}", instrument);
        self.marketdata_get(&endpoint)
            .await?
            .error_for_status()?
            .decode()
    }

    /// 24h ticker for one instrument
    ///
    /// GET /marketdata/api/v2/marketdata/ticker (returns all instruments)
    pub async fn get_ticker(&self, instrument: &str) -> Result<Ticker> {
        let tickers: Vec<Ticker> = self
            .marketdata_get("/api/v2/marketdata/ticker")
            .await?
            .error_for_status()?
            .decode()?;
        tickers
            .into_iter()
            .find(|ticker| ticker.instrument == instrument)
            .ok_or_else(|| Alt5Error::NotFound(format!("ticker for instrument {instrument}")))
    }
}
