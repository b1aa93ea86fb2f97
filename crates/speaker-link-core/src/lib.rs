//! Shared core library for Speaker Link.
//!
//! Keeps a local copy of the backend's speaker directory in sync, tracks which
//! speakers the user selected, and issues group/ungroup/add commands that are
//! reconciled by re-fetching the directory afterwards.

pub mod coordinator;
pub mod directory;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod model;
pub mod protocol;
pub mod selection;
pub mod storage;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{CommandKind, CommandReport, Coordinator, SessionEvent, SessionView};
pub use error::{CommandError, CoreError, FailureKind, ValidationError};
pub use model::{Connectivity, Device, GroupSelector, GroupSummary};
pub use transport::{HttpTransport, Transport};
