/// Document model subsystem - Text storage and editing operations
///
/// A `Buffer` keeps its text in a `GapBuffer`, tracks marks through a
/// `MarkSet` and shares a `KillRing` with the other buffers of a session.

pub mod buffer;
pub mod encoding;
pub mod error;
pub mod gap_buffer;
pub mod kill_ring;
pub mod marks;
pub mod utf8;

mod file_io;
mod movement;
mod region;
mod search;

pub use buffer::Buffer;
pub use encoding::LineEnding;
pub use error::{EditError, EditResult};
pub use gap_buffer::GapBuffer;
pub use kill_ring::{KillRing, SharedKillRing};
pub use marks::{MarkId, MarkSet};
