//! Balance+ on-device library
//!
//! Local persistence (journal and cached session) over a key-value store,
//! plus a typed client for the REST service.

pub mod api;
pub mod error;
pub mod journal;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use journal::LocalJournal;
pub use session::{Session, SessionCache};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
