//! Typed HTTP client for the classroom API, plus the background polling a
//! connected player runs.

pub mod error;
pub mod http;
pub mod poller;
pub mod session;

pub use error::ClientError;
pub use http::ClassroomClient;
pub use poller::{
    spawn_poller, ClassroomSnapshot, PollHandle, DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL,
};
pub use session::ClassroomSession;
