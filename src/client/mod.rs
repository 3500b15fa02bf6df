//! Client-side session handling for frontends embedding Fundika auth.
//!
//! Three cooperating pieces: [`SessionConfig`] names the slots and endpoints
//! for one principal type, [`SessionStore`] moves the token and profile
//! snapshot in and out of a [`CredentialStorage`] backend, and [`ApiClient`]
//! talks to the auth API. The token is transport state; the snapshot is
//! display state. Nothing here verifies tokens; the server re-validates the
//! principal on every request.

pub mod api;
pub mod config;
pub mod storage;
pub mod store;

pub use api::ApiClient;
pub use config::SessionConfig;
pub use storage::{CredentialStorage, InMemoryStorage};
pub use store::SessionStore;
