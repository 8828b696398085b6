use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Currency, EngineError, ResultEngine};

const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (transaction
/// amounts, totals, balance) to avoid floating-point drift.
///
/// The persisted JSON form is a plain number in major units (`12.5`), which
/// is what the stored slot has always contained; it is rounded back to cents
/// when read.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(1_234_56);
/// assert_eq!(amount.minor(), 123456);
/// assert_eq!(amount.to_string(), "1234.56");
/// assert_eq!(amount.format(Currency::Usd), "$1,234.56");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest accepted amount, `9,999,999,999,999.99`.
    ///
    /// Up to this bound the major-unit JSON form reads back to the exact
    /// cent, and thousands of maximal records still sum within `i64`.
    pub const MAX: Money = Money(999_999_999_999_999);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Converts a floating major-unit value (as found in stored JSON) into
    /// cents, rounding to the nearest cent.
    pub fn from_major(value: f64) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(
                "amount is not a finite number".to_string(),
            ));
        }
        let scaled = (value * MINOR_PER_MAJOR as f64).round();
        if scaled.abs() > Money::MAX.0 as f64 {
            return Err(too_large());
        }
        Ok(Money(scaled as i64))
    }

    /// Formats the amount for display, e.g. `$1,234.56` or `-€0.40`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let divisor = 10u64.pow(u32::from(currency.minor_units()));
        let major = group_thousands(abs / divisor);
        let minor = abs % divisor;
        let width = usize::from(currency.minor_units());
        format!("{sign}{}{major}.{minor:0width$}", currency.symbol())
    }
}

fn too_large() -> EngineError {
    EngineError::InvalidAmount(format!(
        "amount must not exceed {}",
        Money::MAX
    ))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(self.0 / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.0 as f64 / MINOR_PER_MAJOR as f64)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value).map_err(de::Error::custom)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses user input such as `12`, `12.5` or `-3,40` into cents.
    ///
    /// Either `.` or `,` separates at most two decimals. The magnitude is
    /// bounded by [`Money::MAX`]; the sign is kept so validation can report
    /// non-positive amounts itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };
        if unsigned.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (whole, fraction) = unsigned.split_once(['.', ',']).unwrap_or((unsigned, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(EngineError::InvalidAmount(format!("not a number: {input}")));
        }
        if fraction.len() > 2 {
            return Err(EngineError::InvalidAmount(
                "at most two decimals allowed".to_string(),
            ));
        }

        let cents = format!("{fraction:0<2}")
            .parse::<i64>()
            .ok()
            .zip(whole.parse::<i64>().ok())
            .and_then(|(cents, whole)| whole.checked_mul(MINOR_PER_MAJOR)?.checked_add(cents))
            .filter(|cents| *cents <= Money::MAX.0)
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}
