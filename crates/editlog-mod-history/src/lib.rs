/// Undo/redo command log for a single mutable text buffer.
///
/// Provides an `UndoManager` that keeps two LIFO logs (undo and redo) of
/// reversible text edits. Entries hold only what is needed to reverse the
/// edit, so each one costs O(edit size) rather than a buffer snapshot.
/// History lives in memory for the lifetime of the owning editing surface.
pub mod config;
pub mod log;
pub mod manager;
pub mod operation;

pub use config::HistoryConfig;
pub use log::EditLog;
pub use manager::{ReplayDirection, UndoManager};
pub use operation::{CaretSnapshot, LogEntry, OperationKind};
