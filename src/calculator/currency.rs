use anyhow::Result;
use rust_decimal::Decimal;

/// Smallest accepted rate is 0.0001.
const MIN_RATE_SCALE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Currency {
    Eur,
    Usd,
    Rub,
}

impl Currency {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::Eur => "eur",
            Self::Usd => "usd",
            Self::Rub => "rub",
        }
    }

    /// Label used in messages; distinct from the code.
    pub(crate) fn display_name(&self) -> &'static str {
        match self {
            Self::Eur => "Euro",
            Self::Usd => "USD",
            Self::Rub => "руб",
        }
    }

    /// Exact lowercase code match only.
    pub(crate) fn parse(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.code() == code)
    }

    pub(crate) fn all() -> &'static [Currency] {
        &[Self::Eur, Self::Usd, Self::Rub]
    }

    /// Built-in rate in roubles per unit.
    fn default_rate(&self) -> Decimal {
        match self {
            Self::Eur => Decimal::new(8991, 2),
            Self::Usd => Decimal::new(7370, 2),
            Self::Rub => Decimal::ONE,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Conversion rates from the base unit (rub) into each supported currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RateTable {
    eur: Decimal,
    usd: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            eur: Currency::Eur.default_rate(),
            usd: Currency::Usd.default_rate(),
        }
    }
}

impl RateTable {
    pub(crate) fn rate(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Eur => self.eur,
            Currency::Usd => self.usd,
            Currency::Rub => Currency::Rub.default_rate(),
        }
    }

    /// Override one rate. Rates below 0.0001 are rejected and rub stays
    /// pinned at 1.
    pub(crate) fn with_rate(mut self, currency: Currency, rate: Decimal) -> Result<Self> {
        let min = Decimal::new(1, MIN_RATE_SCALE);
        if rate < min {
            anyhow::bail!("Rate for {currency} must be at least {min}, got {rate}");
        }
        match currency {
            Currency::Eur => self.eur = rate,
            Currency::Usd => self.usd = rate,
            Currency::Rub if rate == Decimal::ONE => {}
            Currency::Rub => anyhow::bail!("rub is the base unit; its rate is always 1"),
        }
        Ok(self)
    }
}
