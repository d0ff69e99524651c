use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

/// Number of nights between check-in and check-out.
///
/// Dates carry no time component, so the day difference is already whole.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Reject a stay that does not last at least one night
pub fn ensure_valid_stay(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<()> {
    if nights_between(check_in, check_out) <= 0 {
        return Err(AppError::BadRequest(
            "Check-out date must be after check-in date".to_string(),
        ));
    }
    Ok(())
}

/// Total price of a stay: nightly rate times the number of nights.
pub fn compute_price(
    price_per_night: Decimal,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> AppResult<Decimal> {
    ensure_valid_stay(check_in, check_out)?;
    Ok(price_per_night * Decimal::from(nights_between(check_in, check_out)))
}
