//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};

/// Price of `quantity` units at `unit_price`, saturating at the decimal bounds.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price.saturating_mul(Decimal::from(quantity))
}

/// Converts a decimal amount into money, rounded to the currency's minor units.
///
/// Amounts too large for `i64` minor units saturate.
pub fn to_money(amount: Decimal, currency: &'static Currency) -> Money<'static, Currency> {
    let scale = Decimal::from(10_u64.pow(currency.exponent));

    let minor_units = amount
        .checked_mul(scale)
        .and_then(|value| value.round_dp(0).to_i64())
        .unwrap_or(i64::MAX);

    Money::from_minor(minor_units, currency)
}

/// Looks up one of the supported currencies by ISO code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code.trim().to_ascii_uppercase().as_str() {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::JPY;

    use super::*;

    #[test]
    fn line_total_multiplies_by_quantity() {
        assert_eq!(line_total(Decimal::new(19_99, 2), 5), Decimal::new(99_95, 2));
        assert_eq!(line_total(Decimal::new(19_99, 2), 0), Decimal::ZERO);
    }

    #[test]
    fn line_total_saturates_on_overflow() {
        assert_eq!(line_total(Decimal::MAX / Decimal::ONE_HUNDRED, u32::MAX), Decimal::MAX);
    }

    #[test]
    fn to_money_uses_minor_units() {
        assert_eq!(to_money(Decimal::new(25_00, 2), USD), Money::from_minor(25_00, USD));
        assert_eq!(to_money(Decimal::new(3, 1), GBP), Money::from_minor(30, GBP));
    }

    #[test]
    fn to_money_rounds_to_currency_exponent() {
        assert_eq!(to_money(Decimal::new(1_005, 3), USD), Money::from_minor(100, USD));
        assert_eq!(to_money(Decimal::new(1_50, 2), JPY), Money::from_minor(2, JPY));
    }

    #[test]
    fn to_money_saturates_on_overflow() {
        assert_eq!(to_money(Decimal::MAX, USD), Money::from_minor(i64::MAX, USD));
    }

    #[test]
    fn currency_from_code_is_case_insensitive() {
        assert_eq!(currency_from_code("usd"), Some(USD));
        assert_eq!(currency_from_code(" EUR "), Some(EUR));
        assert_eq!(currency_from_code("GBP"), Some(GBP));
        assert_eq!(currency_from_code("ABC"), None);
    }
}
