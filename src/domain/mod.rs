//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod application;
pub mod cart;
pub mod class;
pub mod enrollment;
pub mod payment;
pub mod reporting;
pub mod user;

pub use application::{InstructorApplication, NewApplication};
pub use cart::{CartItem, NewCartItem};
pub use class::{Class, NewClass, ReviewStatus, SeatCount, StatusChange, UpdateClass};
pub use enrollment::{EnrolledClass, Enrollment};
pub use payment::{
    to_minor_units, CheckoutOrder, CheckoutSummary, PaymentInfo, PaymentIntent,
    PaymentIntentRequest, PaymentRecord,
};
pub use reporting::{AdminStats, InstructorRanking};
pub use user::{NewUser, UpdateUser, User, UserRole};
