//! REST endpoint URLs.
//!
//! | Purpose | Method | Path |
//! |---|---|---|
//! | Register | POST | `/api/auth/signup` |
//! | Login | POST | `/api/auth/login` |
//! | Create / list shops | POST / GET | `/api/shops` |
//! | Get shop | GET | `/api/shops/:slugOrId` |
//! | Update shop | PUT | `/api/shops/update/:id` |
//! | Get queue | GET | `/api/shops/:id/queues` |
//! | Create / list barbers | POST / GET | `/api/barbers` |
//! | Update / delete barber | PATCH / DELETE | `/api/barbers/:id` |

use url::Url;

use queuemate_core::{BarberId, ShopId};

/// Builds endpoint URLs from the configured base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Create endpoints rooted at `base`.
    #[must_use]
    pub const fn new(base: Url) -> Self {
        Self { base }
    }

    /// The base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// `POST /api/auth/signup`
    #[must_use]
    pub fn signup(&self) -> Url {
        self.path(&["api", "auth", "signup"])
    }

    /// `POST /api/auth/login`
    #[must_use]
    pub fn login(&self) -> Url {
        self.path(&["api", "auth", "login"])
    }

    /// `GET|POST /api/shops`
    #[must_use]
    pub fn shops(&self) -> Url {
        self.path(&["api", "shops"])
    }

    /// `GET /api/shops/:slugOrId`
    #[must_use]
    pub fn shop(&self, slug_or_id: &str) -> Url {
        self.path(&["api", "shops", slug_or_id])
    }

    /// `PUT /api/shops/update/:id`
    #[must_use]
    pub fn update_shop(&self, id: &ShopId) -> Url {
        self.path(&["api", "shops", "update", id.as_str()])
    }

    /// `GET /api/shops/:id/queues`
    #[must_use]
    pub fn shop_queue(&self, id: &ShopId) -> Url {
        self.path(&["api", "shops", id.as_str(), "queues"])
    }

    /// `GET|POST /api/barbers`
    #[must_use]
    pub fn barbers(&self) -> Url {
        self.path(&["api", "barbers"])
    }

    /// `PATCH|DELETE /api/barbers/:id`
    #[must_use]
    pub fn barber(&self, id: &BarberId) -> Url {
        self.path(&["api", "barbers", id.as_str()])
    }

    /// Append percent-encoded segments to the base path.
    fn path(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_paths() {
        let e = endpoints("https://api.example.com/");
        assert_eq!(e.login().as_str(), "https://api.example.com/api/auth/login");
        assert_eq!(e.signup().as_str(), "https://api.example.com/api/auth/signup");
        assert_eq!(e.shops().as_str(), "https://api.example.com/api/shops");
        assert_eq!(
            e.update_shop(&ShopId::new("s1")).as_str(),
            "https://api.example.com/api/shops/update/s1"
        );
        assert_eq!(
            e.shop_queue(&ShopId::new("s1")).as_str(),
            "https://api.example.com/api/shops/s1/queues"
        );
        assert_eq!(
            e.barber(&BarberId::new("b1")).as_str(),
            "https://api.example.com/api/barbers/b1"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let e = endpoints("https://example.com/queuemate/");
        assert_eq!(e.shops().as_str(), "https://example.com/queuemate/api/shops");
        let e = endpoints("https://example.com/queuemate");
        assert_eq!(e.shops().as_str(), "https://example.com/queuemate/api/shops");
    }

    #[test]
    fn test_segments_are_encoded() {
        let e = endpoints("https://api.example.com/");
        assert_eq!(
            e.shop("fade house/1").as_str(),
            "https://api.example.com/api/shops/fade%20house%2F1"
        );
    }
}
