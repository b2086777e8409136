//! A dashboard session: boards plus the shared preview row count.

use dq_report::Renderable;
use tracing::debug;

use crate::board::Board;
use crate::config::DashboardConfig;
use crate::error::{BoardError, Result};
use crate::samples;

/// One user session. Sessions own their boards and share nothing.
pub struct Dashboard {
    config: DashboardConfig,
    preview_rows: usize,
    boards: Vec<Board>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            preview_rows: config.clamp_rows(config.preview_rows_default),
            config,
            boards: Vec::new(),
        }
    }

    /// A session with the built-in sample boards.
    pub fn with_samples(config: DashboardConfig) -> Self {
        let mut dashboard = Self::new(config);
        for board in samples::boards() {
            dashboard.add_board(board);
        }
        dashboard
    }

    /// Add `board`, replacing any board with the same name.
    pub fn add_board(&mut self, board: Board) {
        self.boards.retain(|existing| existing.name() != board.name());
        self.boards.push(board);
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board_names(&self) -> Vec<String> {
        self.boards.iter().map(|board| board.name().to_string()).collect()
    }

    pub fn board(&self, name: &str) -> Option<&Board> {
        self.boards.iter().find(|board| board.name() == name)
    }

    pub fn board_mut(&mut self, name: &str) -> Result<&mut Board> {
        let available = self.board_names();
        self.boards
            .iter_mut()
            .find(|board| board.name() == name)
            .ok_or_else(|| BoardError::UnknownBoard {
                name: name.to_string(),
                available,
            })
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    /// Set the preview row count, clamped to the configured maximum.
    /// Returns the value in effect.
    pub fn set_preview_rows(&mut self, rows: usize) -> usize {
        self.preview_rows = self.config.clamp_rows(rows);
        if self.preview_rows != rows {
            debug!(requested = rows, applied = self.preview_rows, "clamped preview rows");
        }
        self.preview_rows
    }

    /// Preview of board `name` at the session's row count.
    pub fn preview_table(&mut self, name: &str) -> Result<Box<dyn Renderable>> {
        let rows = self.preview_rows;
        self.board_mut(name)?.preview_table(rows)
    }
}
