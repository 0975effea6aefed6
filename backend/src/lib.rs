//! Freight carrier REST backend.
//!
//! Users, boats, and loads over a document store, with Google OAuth2 login
//! and per-owner access control on boats. The interesting part is the
//! owner-scoped boat/load association: both sides of the link are
//! denormalised and kept in step by the domain services in
//! [`domain::assignment_service`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::Trace;
