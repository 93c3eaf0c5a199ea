//! Shared state made available to page trees through a typed [`Scope`].

pub mod admin_language;
pub mod auth;
pub mod language;
pub mod scope;
pub mod websocket;

pub use admin_language::{use_admin_language, AdminLanguageContext};
pub use auth::{use_auth, AuthBackend, AuthContext, AuthStatus, Session, TOKEN_STORAGE_KEY};
pub use language::{use_language, LanguageContext};
pub use scope::{ContextValue, Scope};
pub use websocket::{use_websocket, ConnectionState, WebSocketContext};
