//! Core types for QueueMate.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod barber;
pub mod email;
pub mod hours;
pub mod id;
pub mod password;
pub mod queue;
pub mod shop;
pub mod status;

pub use barber::{Barber, BarberFormError, BarberUpdate, NewBarber, Service, ServiceDraft};
pub use email::{Email, EmailError};
pub use hours::{HoursError, OpeningHours};
pub use id::*;
pub use password::{Password, PasswordError};
pub use queue::{BarberRef, QueueEntry, QueueStats};
pub use shop::{NewShop, Shop, ShopFormError, ShopOwner, ShopUpdate};
pub use status::*;
