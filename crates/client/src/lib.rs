//! QueueMate client library.
//!
//! Everything a shop-owner front-end needs besides rendering:
//!
//! - [`session`] - persisted credential and user record, login/signup/logout
//! - [`gate`] - which screen tree is active for the current session
//! - [`api`] - REST endpoints and the authenticated client
//! - [`setup`], [`dashboard`], [`poller`], [`roster`] - screen view-models
//! - [`confirm`] - confirmation requests for destructive actions
//! - [`state`] - the [`QueueMate`] context tying them together
//!
//! # Session invalidation
//!
//! A 401 from any authenticated request clears the session. Observers of
//! [`SessionStore::subscribe`] (including [`NavigationGate`]) see the change
//! and route back to sign-in.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod confirm;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod poller;
pub mod roster;
pub mod session;
pub mod setup;
pub mod state;
pub mod storage;
pub mod token;

pub use api::{ApiClient, Endpoints};
pub use config::{ClientConfig, ConfigError};
pub use confirm::{ConfirmationRequest, Decision, Resolution, resolve};
pub use dashboard::{Dashboard, ShopLoad};
pub use error::{AuthError, ClientError};
pub use gate::{NavigationGate, Route, Screen};
pub use poller::{MIN_PERIOD, QueuePoller, QueueSnapshot};
pub use roster::{Roster, RosterFilter, StatusFilter};
pub use session::{Session, SessionStore, UserRecord};
pub use setup::{ShopVerification, create_shop, verify_existing_shop};
pub use state::QueueMate;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use token::Credential;
