//! Normalized split sizes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A size fraction in `[0, 1]`.
///
/// Construction through [`Fraction::new`] rejects NaN and values outside the
/// closed unit interval. Decoders that must accept foreign data use
/// [`Fraction::saturating`] instead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    pub const ZERO: Self = Self(0.0);
    pub const HALF: Self = Self(0.5);
    pub const ONE: Self = Self(1.0);

    /// Validate and wrap a fraction.
    pub fn new(value: f64) -> Result<Self, FractionError> {
        if value.is_nan() {
            return Err(FractionError::NotANumber);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(FractionError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Clamp any value into range. NaN becomes an even split.
    #[must_use]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::HALF
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The wrapped value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Size of the other half of the split.
    #[inline]
    #[must_use]
    pub fn complement(self) -> Self {
        Self(1.0 - self.0)
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(fraction: Fraction) -> Self {
        fraction.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected fraction value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractionError {
    NotANumber,
    OutOfRange { value: f64 },
}

impl fmt::Display for FractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "fraction must not be NaN"),
            Self::OutOfRange { value } => {
                write!(f, "fraction {value} is outside the range [0, 1]")
            }
        }
    }
}

impl std::error::Error for FractionError {}

#[cfg(test)]
mod tests {
    use super::{Fraction, FractionError};
    use proptest::prelude::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(Fraction::new(0.0).expect("zero").get(), 0.0);
        assert_eq!(Fraction::new(1.0).expect("one").get(), 1.0);
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert_eq!(
            Fraction::new(-0.01),
            Err(FractionError::OutOfRange { value: -0.01 })
        );
        assert_eq!(
            Fraction::new(1.01),
            Err(FractionError::OutOfRange { value: 1.01 })
        );
        assert_eq!(Fraction::new(f64::NAN), Err(FractionError::NotANumber));
        assert!(Fraction::new(f64::INFINITY).is_err());
    }

    #[test]
    fn saturating_clamps_and_maps_nan_to_half() {
        assert_eq!(Fraction::saturating(-3.0), Fraction::ZERO);
        assert_eq!(Fraction::saturating(7.5), Fraction::ONE);
        assert_eq!(Fraction::saturating(f64::NAN), Fraction::HALF);
        assert_eq!(Fraction::saturating(0.25).get(), 0.25);
    }

    #[test]
    fn deserialization_validates() {
        let ok: Fraction = serde_json::from_str("0.3").expect("in range");
        assert_eq!(ok.get(), 0.3);
        assert!(serde_json::from_str::<Fraction>("1.5").is_err());
    }

    proptest! {
        #[test]
        fn in_range_values_are_preserved_exactly(value in 0.0f64..=1.0) {
            let fraction = Fraction::new(value).expect("value is in range");
            prop_assert_eq!(fraction.get().to_bits(), value.to_bits());
            let encoded = serde_json::to_string(&fraction).expect("encode");
            let decoded: Fraction = serde_json::from_str(&encoded).expect("decode");
            prop_assert_eq!(decoded.get().to_bits(), value.to_bits());
        }

        #[test]
        fn saturating_always_lands_in_range(value in any::<f64>()) {
            let fraction = Fraction::saturating(value);
            prop_assert!(Fraction::new(fraction.get()).is_ok());
        }
    }
}
