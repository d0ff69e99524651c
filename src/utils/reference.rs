use chrono::Utc;
use rand::Rng;

const PREFIX: &str = "BK";

/// Generate a human-facing booking reference such as `BK-718234567-042`.
///
/// The middle part is the current Unix time in milliseconds with its first
/// four digits dropped; the tail is a zero-padded random number below 1000.
/// Uniqueness is left to the `bookings.booking_reference` unique index.
pub fn generate_booking_reference() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let fragment = millis.get(4..).unwrap_or(&millis);
    let suffix: u16 = rand::thread_rng().gen_range(0..1000);

    format!("{}-{}-{:03}", PREFIX, fragment, suffix)
}
