/// Undo/redo manager pairing two edit logs.
///
/// The owning surface records each applied edit here. An undo pops the most
/// recent entry and starts a replay; the surface reverses the edit in its
/// buffer and hands the inverse back through `finish_replay`, which lands it
/// on the redo log. Redo mirrors this in the other direction.
use crate::config::HistoryConfig;
use crate::log::EditLog;
use crate::operation::{CaretSnapshot, LogEntry};

/// Which log a replay popped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
    Undo,
    Redo,
}

/// Manages undo/redo history for a single editing surface.
#[derive(Debug, Clone, Default)]
pub struct UndoManager {
    undo_log: EditLog,
    redo_log: EditLog,
    /// Set between `undo_step`/`redo_step` and `finish_replay`.
    replay: Option<ReplayDirection>,
    config: HistoryConfig,
}

impl UndoManager {
    /// Creates an empty manager.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_log: EditLog::new(),
            redo_log: EditLog::new(),
            replay: None,
            config,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Records an insertion of `length` chars at `index`.
    ///
    /// Zero-length inserts are never recorded. Returns whether an entry
    /// was pushed.
    pub fn record_insert(&mut self, index: usize, length: usize, caret: CaretSnapshot) -> bool {
        if length == 0 {
            tracing::debug!(index, "ignoring zero-length insert");
            return false;
        }
        self.record(LogEntry::insert(index, length, caret))
    }

    /// Records removal of `removed` (which was `length` chars) at `index`.
    pub fn record_delete(
        &mut self,
        removed: String,
        index: usize,
        length: usize,
        caret: CaretSnapshot,
    ) -> bool {
        if length == 0 {
            tracing::debug!(index, "ignoring zero-length delete");
            return false;
        }
        let actual = removed.chars().count();
        if actual != length {
            tracing::debug!(index, length, actual, "delete text does not match length");
            return false;
        }
        self.record(LogEntry::delete(removed, index, length, caret))
    }

    /// Records a replacement of `removed_length` chars at `index` by
    /// `inserted_length` new chars. `replaced_out` is the removed text.
    ///
    /// A replace that removes nothing is recorded as an insert, and one that
    /// inserts nothing as a delete.
    pub fn record_replace(
        &mut self,
        replaced_out: String,
        index: usize,
        removed_length: usize,
        inserted_length: usize,
        caret: CaretSnapshot,
    ) -> bool {
        match (removed_length, inserted_length) {
            (0, 0) => {
                tracing::debug!(index, "ignoring empty replace");
                false
            }
            (0, inserted) => self.record_insert(index, inserted, caret),
            (removed, 0) => self.record_delete(replaced_out, index, removed, caret),
            (removed, inserted) => {
                let actual = replaced_out.chars().count();
                if actual != removed {
                    tracing::debug!(index, removed, actual, "replace text does not match length");
                    return false;
                }
                self.record(LogEntry::replace(replaced_out, index, inserted, caret))
            }
        }
    }

    /// Pushes a user-originated entry and drops the redo log.
    fn record(&mut self, entry: LogEntry) -> bool {
        if let Some(direction) = self.replay {
            tracing::trace!(?direction, "record ignored during replay");
            return false;
        }
        tracing::trace!(kind = ?entry.kind, index = entry.index, "recording edit");
        self.undo_log.push(entry);
        self.redo_log.reset();
        self.enforce_depth();
        true
    }

    fn enforce_depth(&mut self) {
        if let Some(max) = self.config.depth_limit() {
            let evicted = self.undo_log.truncate_oldest(max);
            if evicted > 0 {
                tracing::trace!(evicted, "evicted oldest undo entries");
            }
        }
    }

    /// Pops the most recent undo entry and starts a replay.
    ///
    /// Returns `None` if there is nothing to undo or a replay is already
    /// running. While the replay runs, record calls are ignored and the redo
    /// log is left alone.
    pub fn undo_step(&mut self) -> Option<LogEntry> {
        self.step(ReplayDirection::Undo)
    }

    /// Pops the most recent redo entry and starts a replay.
    pub fn redo_step(&mut self) -> Option<LogEntry> {
        self.step(ReplayDirection::Redo)
    }

    fn step(&mut self, direction: ReplayDirection) -> Option<LogEntry> {
        if let Some(current) = self.replay {
            tracing::debug!(?current, ?direction, "replay already in progress");
            return None;
        }
        let entry = match direction {
            ReplayDirection::Undo => self.undo_log.pop(),
            ReplayDirection::Redo => self.redo_log.pop(),
        }?;
        self.replay = Some(direction);
        Some(entry)
    }

    /// Ends the running replay and pushes `inverse` onto the opposite log.
    ///
    /// Returns `false` if no replay was running; the inverse is dropped.
    pub fn finish_replay(&mut self, inverse: LogEntry) -> bool {
        match self.replay.take() {
            Some(ReplayDirection::Undo) => {
                self.redo_log.push(inverse);
                true
            }
            Some(ReplayDirection::Redo) => {
                self.undo_log.push(inverse);
                self.enforce_depth();
                true
            }
            None => {
                tracing::warn!("finish_replay called with no replay in progress");
                false
            }
        }
    }

    /// Ends the running replay without pushing anything.
    pub fn abort_replay(&mut self) {
        if let Some(direction) = self.replay.take() {
            tracing::debug!(?direction, "replay aborted");
        }
    }

    /// The direction of the running replay, if any.
    pub fn is_replaying(&self) -> Option<ReplayDirection> {
        self.replay
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_log.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_log.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_log.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_log.len()
    }

    pub fn peek_undo(&self) -> Option<&LogEntry> {
        self.undo_log.peek()
    }

    pub fn peek_redo(&self) -> Option<&LogEntry> {
        self.redo_log.peek()
    }

    pub fn undo_log(&self) -> &EditLog {
        &self.undo_log
    }

    pub fn redo_log(&self) -> &EditLog {
        &self.redo_log
    }

    /// Clears both logs and cancels any replay.
    pub fn reset(&mut self) {
        self.undo_log.reset();
        self.redo_log.reset();
        self.replay = None;
    }

    /// Clears only the redo log.
    pub fn reset_redo(&mut self) {
        self.redo_log.reset();
    }
}
