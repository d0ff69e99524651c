use chrono::NaiveDate;

/// Check whether an existing stay collides with a requested one.
///
/// Boundaries are inclusive: a stay that checks out on the day another
/// checks in still counts as a collision. The three clauses mirror the
/// SQL filter in [`crate::services::availability::find_conflicts`].
pub fn stays_overlap(
    existing_check_in: NaiveDate,
    existing_check_out: NaiveDate,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> bool {
    let within = |day: NaiveDate| day >= check_in && day <= check_out;

    within(existing_check_in)
        || within(existing_check_out)
        || (existing_check_in <= check_in && existing_check_out >= check_out)
}
