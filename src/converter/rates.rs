use crate::error::TriptychError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Rub,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Rub];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rub => "RUB",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    /// The two other currencies, in display order.
    pub fn others(self) -> [Currency; 2] {
        match self {
            Currency::Usd => [Currency::Eur, Currency::Rub],
            Currency::Eur => [Currency::Usd, Currency::Rub],
            Currency::Rub => [Currency::Usd, Currency::Eur],
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Body of `GET /v4/latest/USD`. Only `rates` is read.
#[derive(Debug, Deserialize)]
pub struct RatesResponse {
    #[serde(default)]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

/// Multipliers keyed by ordered currency pair.
///
/// Built in one piece and replaced in one piece; never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<(Currency, Currency), f64>,
}

impl RateTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Derive all six pairs from USD-based quotes.
    ///
    /// Reverse and cross rates are each computed from the two quotes directly.
    pub fn from_usd_quotes(usd_to_eur: f64, usd_to_rub: f64) -> Result<Self, TriptychError> {
        let eur = positive(usd_to_eur, "EUR")?;
        let rub = positive(usd_to_rub, "RUB")?;

        let rates = HashMap::from([
            ((Currency::Usd, Currency::Eur), eur),
            ((Currency::Usd, Currency::Rub), rub),
            ((Currency::Eur, Currency::Usd), 1.0 / eur),
            ((Currency::Rub, Currency::Usd), 1.0 / rub),
            ((Currency::Eur, Currency::Rub), rub / eur),
            ((Currency::Rub, Currency::Eur), eur / rub),
        ]);
        Ok(Self { rates })
    }

    pub fn from_response(resp: &RatesResponse) -> Result<Self, TriptychError> {
        let eur = resp.rates.get("EUR").copied().unwrap_or(0.0);
        let rub = resp.rates.get("RUB").copied().unwrap_or(0.0);
        Self::from_usd_quotes(eur, rub)
    }

    pub fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        self.rates.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn positive(quote: f64, code: &'static str) -> Result<f64, TriptychError> {
    if quote.is_finite() && quote > 0.0 {
        Ok(quote)
    } else {
        Err(TriptychError::MissingQuote(code))
    }
}
