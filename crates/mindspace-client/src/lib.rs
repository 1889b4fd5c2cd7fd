//! MindSpace Client - accounts, persistence, and data access.
//!
//! Everything between the session engine and a user interface: the mock
//! auth service with its persisted session record, the API layer with
//! explicit mock-fallback tagging, and the navigation guard.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | Typed endpoint access; failed requests serve tagged mock data |
//! | [`auth`] | Mock login/signup, change subscriptions, session rehydration |
//! | [`routes`] | Route table and the authentication guard |
//! | [`storage`] | The persisted session record under the `mindspace-auth` key |
//! | [`user`] | User records and the canned account fixtures |

pub mod api;
pub mod auth;
pub mod routes;
pub mod storage;
pub mod user;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::api::{ApiResponse, ApiService, OfflineTransport, ResponseSource, Transport};
    pub use crate::auth::{AuthError, AuthState, AuthStore};
    pub use crate::routes::{resolve, Resolution, Route};
    pub use crate::storage::{
        FileSessionStore, MemorySessionStore, SessionStore, StorageError, STORAGE_KEY,
    };
    pub use crate::user::{MeditationStats, Preferences, Theme, User};
}
