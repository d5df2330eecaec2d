//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod cart_item;
pub mod class;
pub mod enrollment;
pub mod enrollment_class;
pub mod instructor_application;
pub mod payment;
pub mod user;
