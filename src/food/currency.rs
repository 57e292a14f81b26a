/// Fixed USD to EUR rate. Prices are never converted with live rates.
pub const USD_TO_EUR_RATE: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyConverter {
    rate: f64,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new(USD_TO_EUR_RATE)
    }
}

impl CurrencyConverter {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.rate
    }

    /// Spoonacular reports `pricePerServing` in cents.
    pub fn per_serving(&self, minor_units: f64) -> f64 {
        self.convert(minor_units / 100.0)
    }
}
