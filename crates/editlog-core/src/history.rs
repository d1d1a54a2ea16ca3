// Re-exports from editlog-mod-history and conversion from the input config.
// Bridges the history crate's types with editlog-core's surface settings.
pub use editlog_mod_history::{
    CaretSnapshot, EditLog, HistoryConfig, LogEntry, OperationKind, ReplayDirection, UndoManager,
};

use editlog_config::InputConfig;

/// Builds the history settings for a surface from its input config.
pub fn history_config(config: &InputConfig) -> HistoryConfig {
    HistoryConfig::bounded(config.max_history_depth)
}
