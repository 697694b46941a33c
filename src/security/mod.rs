//! Session token handling: claims decoding and persisted session state.

pub mod claims;
pub mod session;

pub use claims::{DecodeError, TokenClaims, decode_claims, is_expired, is_expired_at};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, TOKEN_KEY};
