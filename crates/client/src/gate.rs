//! Navigation gate: which top-level screen tree is active.
//!
//! The route is a pure function of the [`Session`]. It is recomputed from the
//! current session on every change and never remembers a previous route.
//!
//! | Route | Session | Tree |
//! |---|---|---|
//! | `Initializing` | loading | nothing |
//! | `Unauthenticated` | no credential | auth |
//! | `AwaitingShopSetup` | credential, no shop | shop setup |
//! | `Authenticated` | credential and shop | dashboard |

use std::fmt;

use tokio::sync::watch;

use crate::session::{Session, SessionStore};

/// Active top-level tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Initializing,
    Unauthenticated,
    AwaitingShopSetup,
    Authenticated,
}

/// A screen reachable inside a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    ShopSetup,
    Dashboard,
    EditShop,
    BarberManagement,
}

impl Route {
    /// Derive the route from a session.
    #[must_use]
    pub const fn for_session(session: &Session) -> Self {
        if session.is_loading() {
            Self::Initializing
        } else if !session.is_authenticated() {
            Self::Unauthenticated
        } else if session.shop_id().is_none() {
            Self::AwaitingShopSetup
        } else {
            Self::Authenticated
        }
    }

    /// Screens of this route's tree, entry screen first.
    #[must_use]
    pub const fn screens(self) -> &'static [Screen] {
        match self {
            Self::Initializing => &[],
            Self::Unauthenticated => &[Screen::Auth],
            Self::AwaitingShopSetup => &[Screen::ShopSetup],
            Self::Authenticated => &[
                Screen::Dashboard,
                Screen::EditShop,
                Screen::BarberManagement,
                Screen::ShopSetup,
            ],
        }
    }

    /// Whether `screen` belongs to this route's tree.
    #[must_use]
    pub fn allows(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Initializing => "initializing",
            Self::Unauthenticated => "signed out",
            Self::AwaitingShopSetup => "awaiting shop setup",
            Self::Authenticated => "signed in",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Auth => "Auth",
            Self::ShopSetup => "ShopSetup",
            Self::Dashboard => "Dashboard",
            Self::EditShop => "EditShop",
            Self::BarberManagement => "BarberManagement",
        };
        f.write_str(label)
    }
}

/// Observes a [`SessionStore`] and yields the route after every change.
#[derive(Debug)]
pub struct NavigationGate {
    sessions: watch::Receiver<Session>,
}

impl NavigationGate {
    #[must_use]
    pub fn new(store: &SessionStore) -> Self {
        Self {
            sessions: store.subscribe(),
        }
    }

    /// Route for the session as it is now.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::for_session(&self.sessions.borrow())
    }

    /// Wait for the next session change and return the recomputed route.
    ///
    /// Returns `None` once the session store is gone.
    pub async fn changed(&mut self) -> Option<Route> {
        self.sessions.changed().await.ok()?;
        Some(Route::for_session(&self.sessions.borrow_and_update()))
    }

    /// Wait until restoration has finished and return the first real route.
    pub async fn ready(&mut self) -> Option<Route> {
        let session = self.sessions.wait_for(|s| !s.is_loading()).await.ok()?;
        Some(Route::for_session(&session))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::token::Credential;
    use queuemate_core::{ShopId, UserId};

    fn signed_in(shop: Option<&str>) -> Session {
        Session::authenticated(
            Credential::new("t"),
            UserId::new("u1"),
            shop.map(ShopId::new),
            None,
        )
    }

    #[test]
    fn test_route_table() {
        assert_eq!(Route::for_session(&Session::initializing()), Route::Initializing);
        assert_eq!(Route::for_session(&Session::signed_out()), Route::Unauthenticated);
        assert_eq!(Route::for_session(&signed_in(None)), Route::AwaitingShopSetup);
        assert_eq!(Route::for_session(&signed_in(Some("s1"))), Route::Authenticated);
    }

    #[test]
    fn test_route_is_pure() {
        let session = signed_in(None);
        assert_eq!(Route::for_session(&session), Route::for_session(&session));
    }

    #[test]
    fn test_screens_per_route() {
        assert!(Route::Initializing.screens().is_empty());
        assert_eq!(Route::Unauthenticated.screens(), &[Screen::Auth]);
        assert_eq!(Route::AwaitingShopSetup.screens(), &[Screen::ShopSetup]);
        assert_eq!(Route::Authenticated.screens().first(), Some(&Screen::Dashboard));
        assert!(Route::Authenticated.allows(Screen::ShopSetup));
        assert!(!Route::AwaitingShopSetup.allows(Screen::Dashboard));
        assert!(!Route::Unauthenticated.allows(Screen::BarberManagement));
    }
}
