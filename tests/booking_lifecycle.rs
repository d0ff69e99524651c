mod common;

use common::*;
use hotel_management_backend::entities::booking::BookingStatus;
use hotel_management_backend::entities::room::{self, RoomStatus};
use hotel_management_backend::services::availability;
use hotel_management_backend::services::bookings::{self, UpdateBookingRequest};
use hotel_management_backend::utils::overlap::stays_overlap;
use hotel_management_backend::AppError;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

#[tokio::test]
async fn test_create_sets_price_reference_and_reserves_room() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let created = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    assert_eq!(created.booking.total_price, Decimal::from(300));
    assert_eq!(created.booking.booking_status, BookingStatus::Confirmed);
    assert_eq!(created.booking.number_of_guests, 2);
    assert!(created.booking.booking_reference.starts_with("BK-"));
    assert_eq!(created.guest.as_ref().map(|g| g.id), Some(guest.id));
    assert_eq!(created.room.as_ref().map(|r| r.status), Some(RoomStatus::Reserved));
    assert_eq!(room_status(&db, room.id).await, RoomStatus::Reserved);
}

#[tokio::test]
async fn test_create_overrides_maintenance_status() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let stored = room::Entity::find_by_id(room.id).one(&db).await.unwrap().unwrap();
    let mut active: room::ActiveModel = stored.into();
    active.status = Set(RoomStatus::Maintenance);
    active.update(&db).await.unwrap();

    bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    assert_eq!(room_status(&db, room.id).await, RoomStatus::Reserved);
}

#[tokio::test]
async fn test_delete_after_update_releases_room() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let created = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    bookings::update(
        &db,
        created.booking.id,
        UpdateBookingRequest {
            check_out_date: Some(date(6, 5)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    bookings::delete(&db, created.booking.id).await.unwrap();

    assert_eq!(room_status(&db, room.id).await, RoomStatus::Available);
    assert!(matches!(
        bookings::delete(&db, created.booking.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_overlapping_create_is_rejected_with_conflicts() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let first = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let err = bookings::create(&db, booking_request(guest.id, room.id, date(6, 2), date(6, 3)))
        .await
        .unwrap_err();

    match err {
        AppError::Conflict {
            conflicting_bookings,
            ..
        } => {
            assert_eq!(conflicting_bookings.len(), 1);
            assert_eq!(conflicting_bookings[0].id, first.booking.id);
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(all_bookings(&db).await.len(), 1);
}

#[tokio::test]
async fn test_back_to_back_stays_collide() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let err = bookings::create(&db, booking_request(guest.id, room.id, date(6, 4), date(6, 6)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    bookings::create(&db, booking_request(guest.id, room.id, date(6, 5), date(6, 6)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_releases_room_and_frees_dates() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let first = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let cancelled = bookings::update(
        &db,
        first.booking.id,
        UpdateBookingRequest {
            booking_status: Some(BookingStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(cancelled.booking.booking_status, BookingStatus::Cancelled);
    assert_eq!(room_status(&db, room.id).await, RoomStatus::Available);

    let second = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    assert_eq!(second.booking.total_price, Decimal::from(300));
    assert_eq!(room_status(&db, room.id).await, RoomStatus::Reserved);
}

#[tokio::test]
async fn test_no_show_does_not_block_room() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let first = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    bookings::update(
        &db,
        first.booking.id,
        UpdateBookingRequest {
            booking_status: Some(BookingStatus::NoShow),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(
        availability::is_available(&db, room.id, date(6, 2), date(6, 3), None)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_delete_always_releases_room() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let created = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    // A manual Maintenance status is overwritten too
    let stored = room::Entity::find_by_id(room.id).one(&db).await.unwrap().unwrap();
    let mut active: room::ActiveModel = stored.into();
    active.status = Set(RoomStatus::Maintenance);
    active.update(&db).await.unwrap();

    bookings::delete(&db, created.booking.id).await.unwrap();

    assert_eq!(room_status(&db, room.id).await, RoomStatus::Available);
    assert!(all_bookings(&db).await.is_empty());
    assert!(matches!(
        bookings::get(&db, created.booking.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_cancelled_booking_still_releases_room() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let created = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    bookings::update(
        &db,
        created.booking.id,
        UpdateBookingRequest {
            booking_status: Some(BookingStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    bookings::delete(&db, created.booking.id).await.unwrap();
    assert_eq!(room_status(&db, room.id).await, RoomStatus::Available);
}

#[tokio::test]
async fn test_move_to_another_room_swaps_status_and_reprices() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room_a = seed_room(&db, "101", 100).await;
    let room_b = seed_room(&db, "202", 150).await;

    let created = bookings::create(&db, booking_request(guest.id, room_a.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let moved = bookings::update(
        &db,
        created.booking.id,
        UpdateBookingRequest {
            room_id: Some(room_b.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(moved.booking.room_id, room_b.id);
    assert_eq!(moved.booking.total_price, Decimal::from(450));
    assert_eq!(room_status(&db, room_a.id).await, RoomStatus::Available);
    assert_eq!(room_status(&db, room_b.id).await, RoomStatus::Reserved);
}

#[tokio::test]
async fn test_update_into_taken_dates_is_rejected() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let first = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    let second = bookings::create(&db, booking_request(guest.id, room.id, date(6, 10), date(6, 12)))
        .await
        .unwrap();

    let err = bookings::update(
        &db,
        second.booking.id,
        UpdateBookingRequest {
            check_in_date: Some(date(6, 3)),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    match err {
        AppError::Conflict {
            conflicting_bookings,
            ..
        } => assert_eq!(conflicting_bookings[0].id, first.booking.id),
        other => panic!("expected conflict, got {:?}", other),
    }

    let unchanged = bookings::get(&db, second.booking.id).await.unwrap();
    assert_eq!(unchanged.booking.check_in_date, date(6, 10));
}

#[tokio::test]
async fn test_update_own_dates_ignores_itself_and_reprices() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let created = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let extended = bookings::update(
        &db,
        created.booking.id,
        UpdateBookingRequest {
            check_out_date: Some(date(6, 6)),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(extended.booking.check_out_date, date(6, 6));
    assert_eq!(extended.booking.total_price, Decimal::from(500));
}

#[tokio::test]
async fn test_reactivating_cancelled_booking_checks_availability() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let first = bookings::create(&db, booking_request(guest.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    bookings::update(
        &db,
        first.booking.id,
        UpdateBookingRequest {
            booking_status: Some(BookingStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    bookings::create(&db, booking_request(guest.id, room.id, date(6, 2), date(6, 5)))
        .await
        .unwrap();

    let err = bookings::update(
        &db,
        first.booking.id,
        UpdateBookingRequest {
            booking_status: Some(BookingStatus::Confirmed),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_reference_survives_updates() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let mut request = booking_request(guest.id, room.id, date(6, 1), date(6, 4));
    request.booking_reference = Some("BK-CUSTOM-001".to_string());
    let created = bookings::create(&db, request).await.unwrap();
    assert_eq!(created.booking.booking_reference, "BK-CUSTOM-001");

    let updated = bookings::update(
        &db,
        created.booking.id,
        UpdateBookingRequest {
            check_out_date: Some(date(6, 5)),
            special_requests: Some("Late arrival".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.booking.booking_reference, "BK-CUSTOM-001");
    assert_eq!(updated.booking.special_requests.as_deref(), Some("Late arrival"));
}

#[tokio::test]
async fn test_duplicate_reference_is_refused_by_store() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room_a = seed_room(&db, "101", 100).await;
    let room_b = seed_room(&db, "102", 100).await;

    let mut first = booking_request(guest.id, room_a.id, date(6, 1), date(6, 4));
    first.booking_reference = Some("BK-SAME-001".to_string());
    bookings::create(&db, first).await.unwrap();

    let mut second = booking_request(guest.id, room_b.id, date(6, 1), date(6, 4));
    second.booking_reference = Some("BK-SAME-001".to_string());
    let err = bookings::create(&db, second).await.unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(room_status(&db, room_b.id).await, RoomStatus::Available);
}

#[tokio::test]
async fn test_missing_references_are_not_found() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let err = bookings::create(&db, booking_request(guest.id, 999, date(6, 1), date(6, 4)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Room not found"));

    let err = bookings::create(&db, booking_request(999, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref m) if m == "Guest not found"));

    let err = bookings::update(&db, 999, UpdateBookingRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(matches!(
        bookings::delete(&db, 999).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_stays_are_rejected_before_persisting() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    let err = bookings::create(&db, booking_request(guest.id, room.id, date(6, 4), date(6, 4)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let mut request = booking_request(guest.id, room.id, date(6, 1), date(6, 4));
    request.number_of_guests = Some(0);
    let err = bookings::create(&db, request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert!(all_bookings(&db).await.is_empty());
    assert_eq!(room_status(&db, room.id).await, RoomStatus::Available);
}

#[tokio::test]
async fn test_list_by_guest_only_returns_their_bookings() {
    let db = setup_db().await;
    let ada = seed_guest(&db, "ada@example.com").await;
    let grace = seed_guest(&db, "grace@example.com").await;
    let room = seed_room(&db, "101", 100).await;

    bookings::create(&db, booking_request(ada.id, room.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();
    bookings::create(&db, booking_request(grace.id, room.id, date(6, 10), date(6, 12)))
        .await
        .unwrap();
    bookings::create(&db, booking_request(ada.id, room.id, date(7, 1), date(7, 2)))
        .await
        .unwrap();

    let listed = bookings::list_by_guest(&db, ada.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|d| d.booking.guest_id == ada.id));
    assert!(listed.iter().all(|d| d.room.is_some()));
    assert_eq!(bookings::list_all(&db).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_available_rooms_skip_booked_and_maintenance() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let booked = seed_room(&db, "101", 100).await;
    let free = seed_room(&db, "102", 100).await;
    let closed = seed_room(&db, "103", 100).await;

    let mut active: room::ActiveModel = closed.clone().into();
    active.status = Set(RoomStatus::Maintenance);
    active.update(&db).await.unwrap();

    bookings::create(&db, booking_request(guest.id, booked.id, date(6, 1), date(6, 4)))
        .await
        .unwrap();

    let rooms = availability::available_rooms(&db, date(6, 2), date(6, 6))
        .await
        .unwrap();
    let ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![free.id]);

    // A reserved room is still offered for dates it is free
    let later = availability::available_rooms(&db, date(6, 10), date(6, 12))
        .await
        .unwrap();
    let ids: Vec<i32> = later.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![booked.id, free.id]);
}

#[tokio::test]
async fn test_active_bookings_never_overlap() {
    let db = setup_db().await;
    let guest = seed_guest(&db, "ada@example.com").await;
    let room_a = seed_room(&db, "101", 100).await;
    let room_b = seed_room(&db, "102", 80).await;

    let attempts = [
        (room_a.id, date(6, 1), date(6, 4)),
        (room_a.id, date(6, 3), date(6, 8)),
        (room_a.id, date(6, 5), date(6, 9)),
        (room_b.id, date(6, 1), date(6, 30)),
        (room_b.id, date(6, 10), date(6, 11)),
        (room_a.id, date(5, 20), date(6, 20)),
        (room_a.id, date(6, 10), date(6, 12)),
    ];
    for (room_id, check_in, check_out) in attempts {
        let _ = bookings::create(&db, booking_request(guest.id, room_id, check_in, check_out)).await;
    }

    let active: Vec<_> = all_bookings(&db)
        .await
        .into_iter()
        .filter(|b| b.booking_status.is_active())
        .collect();
    assert_eq!(active.len(), 4);

    for (i, a) in active.iter().enumerate() {
        for b in active.iter().skip(i + 1) {
            if a.room_id == b.room_id {
                assert!(!stays_overlap(
                    a.check_in_date,
                    a.check_out_date,
                    b.check_in_date,
                    b.check_out_date
                ));
            }
        }
    }
}
