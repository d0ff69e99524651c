use axum::{
    routing::get,
    Router,
};

use crate::handlers::{self, bookings, guests, rooms, staff};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/guest/{guest_id}", get(bookings::guest_bookings))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        );

    // `/available` is matched before `/{id}`
    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/available", get(rooms::available_rooms))
        .route(
            "/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        );

    let guest_routes = Router::new()
        .route("/", get(guests::list_guests).post(guests::create_guest))
        .route(
            "/{id}",
            get(guests::get_guest)
                .put(guests::update_guest)
                .delete(guests::delete_guest),
        );

    let staff_routes = Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/{id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        );

    Router::new()
        .route("/api", get(handlers::welcome))
        .nest("/api/bookings", booking_routes)
        .nest("/api/rooms", room_routes)
        .nest("/api/guests", guest_routes)
        .nest("/api/staff", staff_routes)
        .with_state(state)
}
