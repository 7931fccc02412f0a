mod errors;
mod lending_service;
mod session;
mod snapshot;

pub use errors::{ErrorKind, LendingError, Result};
pub use lending_service::{LendingService, MemberSummary, ProfileField};
pub use session::Session;
