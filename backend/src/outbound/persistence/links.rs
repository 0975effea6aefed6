//! Canonical `self` URL construction.
//!
//! Stored records never hold their own key or URL; repositories attach
//! both on read. The root is the service's public URL from configuration,
//! so links stay stable regardless of which host served the request.

use url::Url;

use crate::domain::EntityId;

/// Builder for canonical resource URLs under one public root.
#[derive(Debug, Clone)]
pub struct ResourceLinks {
    root: Url,
}

impl ResourceLinks {
    /// Build links under this public root URL.
    #[must_use]
    pub fn new(root: Url) -> Self {
        Self { root }
    }

    /// The public root URL.
    #[must_use]
    pub fn root(&self) -> &Url {
        &self.root
    }

    fn resource(&self, collection: &str, id: EntityId) -> String {
        let base = self.root.as_str().trim_end_matches('/');
        format!("{base}/{collection}/{id}")
    }

    /// Canonical URL of a boat.
    #[must_use]
    pub fn boat(&self, id: EntityId) -> String {
        self.resource("boats", id)
    }

    /// Canonical URL of a load.
    #[must_use]
    pub fn load(&self, id: EntityId) -> String {
        self.resource("loads", id)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://freight.example.com")]
    #[case("https://freight.example.com/")]
    fn trailing_slash_does_not_double(#[case] root: &str) {
        let links = ResourceLinks::new(Url::parse(root).expect("valid root"));
        let id = EntityId::new(7).expect("positive id");
        assert_eq!(links.boat(id), "https://freight.example.com/boats/7");
        assert_eq!(links.load(id), "https://freight.example.com/loads/7");
    }
}
