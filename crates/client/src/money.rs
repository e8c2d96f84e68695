//! Fixed-point currency amounts.
//!
//! The gateway surface speaks decimal dollars; the cloud surface speaks
//! integer credits (1 credit = 1/100 of a major unit). All conversion
//! happens here, exactly once, at the normalization boundary: downstream
//! code only ever sees [`Money`] in major units.

use serde::Serialize;

/// A currency amount stored as integer cents.
///
/// Storing cents avoids floating-point drift when values cross the
/// credits/dollars boundary repeatedly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Money(i64);

impl Money {
    /// Zero amount. Doubles as the "unlimited" sentinel for budgets.
    pub const ZERO: Self = Self(0);

    /// From an integer cent count.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// From decimal dollars, rounding to the nearest cent.
    pub fn from_dollars(dollars: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let cents = (dollars * 100.0).round() as i64;
        Self(cents)
    }

    /// Convert a wire value into major units given the surface's unit
    /// scale: scale 1 means the value is already major units (dollars),
    /// scale 100 means minor-unit credits.
    pub fn from_wire(value: f64, scale: i64) -> Self {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let cents = (value * (100.0 / scale as f64)).round() as i64;
        Self(cents)
    }

    /// The raw cent count.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as decimal dollars.
    pub fn as_dollars(self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let cents = self.0 as f64;
        cents / 100.0
    }

    /// Whether the amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Convert major units (dollars) to minor units for the given scale.
///
/// This is the request-side conversion: `round(dollars * scale)`. For the
/// gateway surface (scale 1) it degenerates to rounding whole dollars.
pub fn major_to_minor(dollars: f64, scale: i64) -> i64 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let minor = (dollars * scale as f64).round() as i64;
    minor
}

impl std::fmt::Display for Money {
    /// Renders two fraction digits, e.g. `$12.34`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}
