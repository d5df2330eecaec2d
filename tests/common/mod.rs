//! Shared setup for integration tests: in-memory SQLite, a fake payment
//! gateway, seed helpers and token minting.

#![allow(dead_code)]

use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::MigratorTrait;
use std::sync::{Arc, Mutex};

use yoga_master::config::Config;
use yoga_master::domain::{
    Class, NewClass, NewUser, PaymentIntent, ReviewStatus, SeatCount, UpdateUser, User, UserRole,
};
use yoga_master::errors::AppResult;
use yoga_master::infra::{ClassRepository, ClassStore, Migrator, PaymentGateway, UserRepository, UserStore};
use yoga_master::services::{ServiceContainer, Services, TokenRequest};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Records every intent request and answers with a fixed client secret.
#[derive(Default)]
pub struct FakeGateway {
    pub requests: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(&self, amount_minor: i64, currency: &str) -> AppResult<PaymentIntent> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((amount_minor, currency.to_string()));
        }
        Ok(PaymentIntent {
            client_secret: format!("pi_test_secret_{amount_minor}"),
        })
    }
}

pub struct TestApp {
    pub db: DatabaseConnection,
    pub config: Config,
    pub services: Services,
    pub gateway: Arc<FakeGateway>,
}

pub fn test_config() -> Config {
    Config::new(
        "sqlite::memory:".to_string(),
        TEST_SECRET.to_string(),
        24,
        "127.0.0.1".to_string(),
        0,
        String::new(),
        "http://127.0.0.1:9".to_string(),
        "http://localhost:5173".to_string(),
    )
    .expect("valid test config")
}

/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.expect("sqlite connects");
    Migrator::up(&db, None).await.expect("migrations apply");

    let config = test_config();
    let gateway = Arc::new(FakeGateway::default());
    let services = Services::with_gateway(db.clone(), config.clone(), gateway.clone());

    TestApp {
        db,
        config,
        services,
        gateway,
    }
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, role: UserRole) -> User {
    let users = UserStore::new(db.clone());
    let user = users
        .create(NewUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            photo_url: None,
            gender: None,
            address: None,
            phone: None,
        })
        .await
        .expect("user created");

    if role == UserRole::Student {
        return user;
    }

    users
        .update(
            user.id,
            UpdateUser {
                role: Some(role.as_str().to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("role updated")
}

/// Approved class with explicit seat counters.
pub async fn seed_class(
    db: &DatabaseConnection,
    instructor_email: &str,
    available_seats: i32,
    total_enrolled: i32,
) -> Class {
    let classes = ClassStore::new(db.clone());
    let class = classes
        .create(
            instructor_email.to_string(),
            NewClass {
                name: format!("Vinyasa with {instructor_email}"),
                image: None,
                instructor_name: None,
                price: 20.0,
                available_seats: SeatCount::Number(i64::from(available_seats)),
                description: None,
                video_link: None,
            },
            available_seats,
        )
        .await
        .expect("class created");

    classes
        .change_status(class.id, ReviewStatus::Approved, "welcome".to_string())
        .await
        .expect("class approved");

    db.execute(Statement::from_sql_and_values(
        DbBackend::Sqlite,
        "UPDATE classes SET total_enrolled = ? WHERE id = ?",
        [total_enrolled.into(), class.id.into()],
    ))
    .await
    .expect("counters set");

    classes
        .find_by_id(class.id)
        .await
        .expect("class loads")
        .expect("class exists")
}

pub async fn reload_class(db: &DatabaseConnection, class: &Class) -> Class {
    ClassStore::new(db.clone())
        .find_by_id(class.id)
        .await
        .expect("class loads")
        .expect("class exists")
}

pub fn token_for(services: &Services, email: &str) -> String {
    services
        .auth()
        .issue_token(TokenRequest {
            email: email.to_string(),
            name: None,
        })
        .expect("token issued")
        .token
}
