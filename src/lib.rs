//! Editing core for a terminal text editor: a gap-buffer text store with
//! UTF-8 aware cursor movement, tracked marks and a shared kill ring.

pub mod config;
pub mod document_model;
pub mod session;

pub use config::{RcConfig, RcLoader};
pub use document_model::{Buffer, EditError, EditResult, KillRing, MarkId, SharedKillRing};
pub use session::Session;
