//! Checkout transaction tests against a real (SQLite) database.

mod common;

use uuid::Uuid;

use common::{reload_class, seed_class, seed_user, setup};
use yoga_master::domain::{CheckoutOrder, PaymentInfo, UserRole};
use yoga_master::errors::AppError;
use yoga_master::infra::{
    CartRepository, CartStore, EnrollmentRepository, EnrollmentStore, PaymentRepository,
    PaymentStore, Persistence, UnitOfWork,
};
use yoga_master::services::ServiceContainer;
use yoga_master::with_transaction;

const BUYER: &str = "buyer@example.com";
const TEACHER: &str = "teacher@example.com";

fn order(class_ids: Vec<Uuid>, transaction_id: &str, single: Option<Uuid>) -> CheckoutOrder {
    order_for(BUYER, class_ids, transaction_id, single)
}

fn order_for(
    user_email: &str,
    class_ids: Vec<Uuid>,
    transaction_id: &str,
    single: Option<Uuid>,
) -> CheckoutOrder {
    CheckoutOrder::new(
        PaymentInfo {
            user_email: user_email.to_string(),
            classes_id: class_ids,
            transaction_id: transaction_id.to_string(),
            amount: 40.0,
            date: None,
        },
        single,
    )
    .expect("valid order")
}

#[tokio::test]
async fn test_checkout_reserves_seats_enrolls_and_clears_cart() {
    let app = setup().await;
    seed_user(&app.db, BUYER, UserRole::Student).await;
    let c1 = seed_class(&app.db, TEACHER, 5, 10).await;
    let c2 = seed_class(&app.db, TEACHER, 1, 3).await;

    let carts = CartStore::new(app.db.clone());
    carts.create(c1.id, BUYER.to_string()).await.unwrap();
    carts.create(c2.id, BUYER.to_string()).await.unwrap();
    carts.create(c1.id, "friend@example.com".to_string()).await.unwrap();

    let summary = app
        .services
        .checkout()
        .complete_checkout(order(vec![c1.id, c2.id], "pi_100", None))
        .await
        .unwrap();

    assert!(!summary.replayed);
    assert_eq!(summary.classes_updated, 2);
    assert_eq!(summary.cart_items_removed, 2);

    let c1 = reload_class(&app.db, &c1).await;
    let c2 = reload_class(&app.db, &c2).await;
    assert_eq!((c1.available_seats, c1.total_enrolled), (4, 11));
    assert_eq!((c2.available_seats, c2.total_enrolled), (0, 4));

    let enrollments = EnrollmentStore::new(app.db.clone()).list_by_user(BUYER).await.unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].classes_id, vec![c1.id, c2.id]);
    assert_eq!(enrollments[0].transaction_id, "pi_100");

    assert!(carts.list_by_user(BUYER).await.unwrap().is_empty());
    assert_eq!(carts.list_by_user("friend@example.com").await.unwrap().len(), 1);

    let payments = PaymentStore::new(app.db.clone()).list_by_user(BUYER).await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, summary.payment_id);
    assert_eq!(payments[0].amount, 40.0);
}

#[tokio::test]
async fn test_sold_out_class_rolls_back_everything() {
    let app = setup().await;
    let open = seed_class(&app.db, TEACHER, 5, 10).await;
    let full = seed_class(&app.db, TEACHER, 0, 8).await;

    let carts = CartStore::new(app.db.clone());
    carts.create(open.id, BUYER.to_string()).await.unwrap();

    let result = app
        .services
        .checkout()
        .complete_checkout(order(vec![open.id, full.id], "pi_200", None))
        .await;

    assert!(matches!(result, Err(AppError::SeatsExhausted(id)) if id == full.id));

    let open = reload_class(&app.db, &open).await;
    assert_eq!((open.available_seats, open.total_enrolled), (5, 10));
    assert!(EnrollmentStore::new(app.db.clone()).list_by_user(BUYER).await.unwrap().is_empty());
    assert_eq!(PaymentStore::new(app.db.clone()).count_by_user(BUYER).await.unwrap(), 0);
    assert_eq!(carts.list_by_user(BUYER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_last_seat_goes_to_one_buyer() {
    let app = setup().await;
    let class = seed_class(&app.db, TEACHER, 1, 0).await;

    app.services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_first", None))
        .await
        .unwrap();

    let second = app
        .services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_second", None))
        .await;
    assert!(matches!(second, Err(AppError::SeatsExhausted(_))));

    let class = reload_class(&app.db, &class).await;
    assert_eq!((class.available_seats, class.total_enrolled), (0, 1));
}

#[tokio::test]
async fn test_repeated_transaction_id_is_replayed() {
    let app = setup().await;
    let class = seed_class(&app.db, TEACHER, 3, 0).await;

    let first = app
        .services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_300", None))
        .await
        .unwrap();
    let second = app
        .services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_300", None))
        .await
        .unwrap();

    assert!(second.replayed);
    assert_eq!(second.enrollment_id, first.enrollment_id);
    assert_eq!(second.payment_id, first.payment_id);
    assert_eq!(second.classes_updated, 0);

    let class = reload_class(&app.db, &class).await;
    assert_eq!((class.available_seats, class.total_enrolled), (2, 1));
    assert_eq!(EnrollmentStore::new(app.db.clone()).count_all().await.unwrap(), 1);
    assert_eq!(PaymentStore::new(app.db.clone()).count_by_user(BUYER).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_class_is_not_found() {
    let app = setup().await;
    let class = seed_class(&app.db, TEACHER, 3, 0).await;

    let result = app
        .services
        .checkout()
        .complete_checkout(order(vec![class.id, Uuid::new_v4()], "pi_400", None))
        .await;

    assert!(matches!(result, Err(AppError::NotFound)));
    assert_eq!(reload_class(&app.db, &class).await.available_seats, 3);
}

#[tokio::test]
async fn test_single_class_id_limits_cart_cleanup() {
    let app = setup().await;
    let c1 = seed_class(&app.db, TEACHER, 3, 0).await;
    let c2 = seed_class(&app.db, TEACHER, 3, 0).await;

    let carts = CartStore::new(app.db.clone());
    carts.create(c1.id, BUYER.to_string()).await.unwrap();
    carts.create(c2.id, BUYER.to_string()).await.unwrap();

    let summary = app
        .services
        .checkout()
        .complete_checkout(order(vec![c1.id, c2.id], "pi_500", Some(c1.id)))
        .await
        .unwrap();

    assert_eq!(summary.cart_items_removed, 1);
    let remaining = carts.list_by_user(BUYER).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].class_id, c2.id);
}

#[tokio::test]
async fn test_payment_intent_uses_cents() {
    let app = setup().await;

    let intent = app
        .services
        .checkout()
        .create_payment_intent(19.99)
        .await
        .unwrap();

    assert_eq!(intent.client_secret, "pi_test_secret_1999");
    let requests = app.gateway.requests.lock().unwrap().clone();
    assert_eq!(requests, vec![(1999, "usd".to_string())]);
}

#[tokio::test]
async fn test_transaction_id_of_another_buyer_conflicts() {
    let app = setup().await;
    let class = seed_class(&app.db, TEACHER, 3, 0).await;
    let other = "other-buyer@example.com";

    app.services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_600", None))
        .await
        .unwrap();

    let result = app
        .services
        .checkout()
        .complete_checkout(order_for(other, vec![class.id], "pi_600", None))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let enrollments = EnrollmentStore::new(app.db.clone());
    assert!(enrollments.list_by_user(other).await.unwrap().is_empty());
    assert_eq!(enrollments.list_by_user(BUYER).await.unwrap().len(), 1);
    assert_eq!(PaymentStore::new(app.db.clone()).count_by_user(other).await.unwrap(), 0);

    let class = reload_class(&app.db, &class).await;
    assert_eq!((class.available_seats, class.total_enrolled), (2, 1));
}

#[tokio::test]
async fn test_spent_transaction_id_violates_unique_key() {
    let app = setup().await;
    let class = seed_class(&app.db, TEACHER, 3, 0).await;

    app.services
        .checkout()
        .complete_checkout(order(vec![class.id], "pi_700", None))
        .await
        .unwrap();

    let uow = Persistence::new(app.db.clone());
    let class_ids = vec![class.id];
    let result = with_transaction!(uow, |ctx| {
        ctx.enrollments().create(BUYER, &class_ids, "pi_700").await
    });

    let err = result.expect_err("a spent transaction id must be rejected");
    assert!(err.is_unique_violation());
    assert_eq!(EnrollmentStore::new(app.db.clone()).count_all().await.unwrap(), 1);
}
