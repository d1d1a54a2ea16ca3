/// Default cap on undo entries. Zero means the log is unbounded.
const DEFAULT_MAX_DEPTH: usize = 0;

/// Configuration for an `UndoManager`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max entries kept in the undo log; oldest are evicted past this.
    /// Zero disables the cap.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HistoryConfig {
    /// A config that keeps at most `max_depth` undo entries.
    pub fn bounded(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the effective cap, or `None` when unbounded.
    pub fn depth_limit(&self) -> Option<usize> {
        (self.max_depth > 0).then_some(self.max_depth)
    }
}
