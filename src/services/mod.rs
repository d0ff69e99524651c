pub mod availability;
pub mod bookings;
pub mod room_status;
