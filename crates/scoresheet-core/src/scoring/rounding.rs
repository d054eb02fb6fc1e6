use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How a percentage is rounded to one decimal place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 0.05 rounds away from zero, as printed on official scoresheets.
    #[default]
    HalfUp,
    HalfEven,
}

impl RoundingMode {
    fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Round a percentage to exactly one decimal place.
pub fn round_percentage(value: Decimal, mode: RoundingMode) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, mode.strategy());
    rounded.rescale(1);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_up_at_boundary() {
        assert_eq!(round_percentage(dec!(70.25), RoundingMode::HalfUp), dec!(70.3));
        assert_eq!(round_percentage(dec!(70.35), RoundingMode::HalfUp), dec!(70.4));
        assert_eq!(round_percentage(dec!(70.249), RoundingMode::HalfUp), dec!(70.2));
    }

    #[test]
    fn test_half_even_at_boundary() {
        assert_eq!(round_percentage(dec!(70.25), RoundingMode::HalfEven), dec!(70.2));
        assert_eq!(round_percentage(dec!(70.35), RoundingMode::HalfEven), dec!(70.4));
    }

    #[test]
    fn test_always_one_decimal_place() {
        assert_eq!(round_percentage(dec!(113), RoundingMode::HalfUp).to_string(), "113.0");
        assert_eq!(round_percentage(Decimal::ZERO, RoundingMode::HalfUp).to_string(), "0.0");
        assert_eq!(
            round_percentage(dec!(113.3333333333), RoundingMode::HalfUp).to_string(),
            "113.3"
        );
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: RoundingMode = serde_json::from_str("\"half_even\"").unwrap();
        assert_eq!(mode, RoundingMode::HalfEven);
        assert_eq!(serde_json::to_string(&RoundingMode::HalfUp).unwrap(), "\"half_up\"");
    }
}
