//! Client library for the task tracker
//!
//! Three pieces: a session manager holding the bearer token, an HTTP
//! client that attaches it to every request and forces logout on any 401,
//! and the in-memory view state (search filter, per-day analytics,
//! optimistic reconciliation).

pub mod http;
pub mod session;
pub mod storage;
pub mod view;

pub use http::{ApiClient, ClientError};
pub use session::{SessionManager, SessionState};
pub use storage::LocalStore;
pub use view::ViewState;
