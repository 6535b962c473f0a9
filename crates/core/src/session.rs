//! Session module - the swap and cascade state machine
//!
//! A session owns the board, the pending selection, the RNG and the scheduler.
//! It moves through four phases:
//!
//! ```text
//!            no match                  rollback delay
//!   Idle ──────────────▶ AwaitingRevert ─────────────▶ Idle
//!    │
//!    │ match                 pause              frames
//!    └──────▶ Resolving ─────────────▶ Animating ───────┐
//!                 ▲     (clear → collapse)              │ settled
//!                 │            match again, after pause │
//!                 └─────────────────────────────────────┤
//!                                                       ▼
//!                                                     Idle
//! ```
//!
//! Every phase other than `Idle` is busy and drops input.

use tracing::{debug, info, warn};

use crate::animation::{AnimState, AnimationDriver};
use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::matcher::{find_matches_into, MatchSet};
use crate::rng::SimpleRng;
use crate::scheduler::{ScheduledTask, Scheduler, TimerQueue};
use crate::snapshot::GameSnapshot;
use crate::types::{Coord, Phase, TICK_MS};

/// What a click or swap request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The session was busy; nothing changed
    Ignored,
    /// The coordinate became the pending selection
    Selected(Coord),
    /// The swap produced `matched` matched tiles and a cascade started
    SwapAccepted { a: Coord, b: Coord, matched: usize },
    /// The swap produced no match and will be reverted
    SwapRejected { a: Coord, b: Coord },
}

/// A running game: board plus resolution state
#[derive(Debug, Clone)]
pub struct Session<S: Scheduler = TimerQueue> {
    config: GameConfig,
    board: Board,
    selection: Option<Coord>,
    phase: Phase,
    scheduler: S,
    rng: SimpleRng,
    animation: AnimationDriver,
    /// Scratch set reused by every match scan
    matches: MatchSet,
    chain_depth: u32,
    revision: u64,
    seed: u32,
}

impl Session<TimerQueue> {
    /// Start a session on a freshly generated, match-free board.
    ///
    /// Uses `config.seed`, or 1 when unset.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_scheduler(config, TimerQueue::new())
    }

    /// Start a session on a caller-provided board.
    ///
    /// The board is used as is, matches included; the configured dimensions are
    /// replaced by the board's.
    pub fn from_board(config: GameConfig, board: Board) -> Result<Self, GameError> {
        Self::from_board_with_scheduler(config, board, TimerQueue::new())
    }
}

impl<S: Scheduler> Session<S> {
    pub fn with_scheduler(config: GameConfig, scheduler: S) -> Result<Self, GameError> {
        config.validate()?;

        let seed = config.seed.unwrap_or(1);
        let mut rng = SimpleRng::new(seed);
        let mut board = Board::random(config.columns, config.rows, &mut rng, &config.palette);
        let passes = board.normalize(&mut rng, &config.palette);
        info!(
            seed,
            columns = config.columns,
            rows = config.rows,
            passes,
            "session started"
        );

        Ok(Self::assemble(config, board, scheduler, rng, seed))
    }

    pub fn from_board_with_scheduler(
        mut config: GameConfig,
        board: Board,
        scheduler: S,
    ) -> Result<Self, GameError> {
        config.columns = board.columns();
        config.rows = board.rows();
        config.validate()?;

        let seed = config.seed.unwrap_or(1);
        let rng = SimpleRng::new(seed);
        Ok(Self::assemble(config, board, scheduler, rng, seed))
    }

    fn assemble(config: GameConfig, board: Board, scheduler: S, rng: SimpleRng, seed: u32) -> Self {
        let animation = AnimationDriver::new(config.decay_factor, config.settle_epsilon);
        let matches = MatchSet::new(board.columns(), board.rows());
        Self {
            config,
            board,
            selection: None,
            phase: Phase::Idle,
            scheduler,
            rng,
            animation,
            matches,
            chain_depth: 0,
            revision: 0,
            seed,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Input is rejected while true
    pub fn busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn chain_depth(&self) -> u32 {
        self.chain_depth
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.board.columns();
        out.rows = self.board.rows();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.selection = self.selection;
        out.phase = self.phase;
        out.chain_depth = self.chain_depth;
        out.revision = self.revision;
        out.tile_size = self.config.tile_size;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Handle a tap on a grid cell.
    ///
    /// With no pending selection the cell becomes the selection. With one, the
    /// pair is handed to [`Session::attempt_swap`].
    pub fn click(&mut self, coord: Coord) -> Result<ClickOutcome, GameError> {
        self.board.check_bounds(coord)?;
        if self.busy() {
            return Ok(ClickOutcome::Ignored);
        }

        match self.selection {
            None => {
                self.selection = Some(coord);
                Ok(ClickOutcome::Selected(coord))
            }
            Some(anchor) => self.attempt_swap(anchor, coord),
        }
    }

    /// Try to swap two tiles.
    ///
    /// A non-adjacent pair only moves the selection to `b`. An adjacent pair is
    /// swapped; without a match the swap is reverted after the rollback delay,
    /// otherwise the cascade starts right away.
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> Result<ClickOutcome, GameError> {
        self.board.check_bounds(a)?;
        self.board.check_bounds(b)?;
        if self.busy() {
            return Ok(ClickOutcome::Ignored);
        }

        if !a.is_adjacent(b) {
            self.selection = Some(b);
            return Ok(ClickOutcome::Selected(b));
        }

        self.selection = None;
        self.board.swap(a, b);
        self.revision += 1;

        find_matches_into(&self.board, &mut self.matches);
        if self.matches.is_empty() {
            debug!(ax = a.x, ay = a.y, bx = b.x, by = b.y, "swap rejected");
            self.phase = Phase::AwaitingRevert;
            self.scheduler
                .schedule(self.config.rollback_delay_ms, ScheduledTask::Revert { a, b });
            return Ok(ClickOutcome::SwapRejected { a, b });
        }

        let matched = self.matches.len();
        debug!(ax = a.x, ay = a.y, bx = b.x, by = b.y, matched, "swap accepted");
        self.resolve_cascade()?;
        Ok(ClickOutcome::SwapAccepted { a, b, matched })
    }

    /// Clear every current match and schedule the collapse.
    ///
    /// Callers must know a match exists; an empty scan is a contract violation
    /// and leaves the session untouched.
    pub fn resolve_cascade(&mut self) -> Result<(), GameError> {
        find_matches_into(&self.board, &mut self.matches);
        if self.matches.is_empty() {
            return Err(GameError::NoMatches);
        }

        self.chain_depth += 1;
        if self.chain_depth > self.config.max_chain_depth {
            warn!(
                chain = self.chain_depth,
                limit = self.config.max_chain_depth,
                "chain limit reached, re-rolling remaining matches in place"
            );
            self.board.normalize(&mut self.rng, &self.config.palette);
            self.revision += 1;
            self.finish();
            return Ok(());
        }

        let removed = self.board.clear_matches(&self.matches);
        self.revision += 1;
        self.phase = Phase::Resolving;
        self.scheduler
            .schedule(self.config.cascade_pause_ms, ScheduledTask::Collapse);
        debug!(chain = self.chain_depth, removed, "matches cleared");
        Ok(())
    }

    /// Frame callback: advance the clock, run due tasks, then step the animation.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<(), GameError> {
        self.scheduler.advance(elapsed_ms);
        while let Some(task) = self.scheduler.pop_due() {
            self.run_task(task)?;
        }

        if self.phase == Phase::Animating {
            self.animate_frame();
        }
        Ok(())
    }

    /// Tick at [`TICK_MS`] until the session is idle.
    /// Returns the number of ticks taken.
    pub fn settle(&mut self, max_ticks: u32) -> Result<u32, GameError> {
        let mut ticks = 0;
        while self.busy() {
            if ticks >= max_ticks {
                return Err(GameError::DidNotSettle { ticks });
            }
            self.tick(TICK_MS)?;
            ticks += 1;
        }
        Ok(ticks)
    }

    fn run_task(&mut self, task: ScheduledTask) -> Result<(), GameError> {
        match task {
            ScheduledTask::Revert { a, b } => {
                self.board.swap(a, b);
                self.revision += 1;
                self.phase = Phase::Idle;
                debug!(ax = a.x, ay = a.y, bx = b.x, by = b.y, "swap reverted");
            }
            ScheduledTask::Collapse => {
                let report = self.board.collapse(
                    &mut self.rng,
                    &self.config.palette,
                    self.config.tile_size,
                );
                self.revision += 1;
                self.phase = Phase::Animating;
                debug!(
                    moved = report.moved,
                    spawned = report.spawned,
                    "columns collapsed"
                );
            }
            ScheduledTask::ClearMatches => self.resolve_cascade()?,
        }
        Ok(())
    }

    fn animate_frame(&mut self) {
        let state = self.animation.step(&mut self.board);
        self.revision += 1;
        if state == AnimState::Settled {
            self.after_settle();
        }
    }

    fn after_settle(&mut self) {
        find_matches_into(&self.board, &mut self.matches);
        if self.matches.is_empty() {
            self.finish();
        } else {
            debug!(chain = self.chain_depth, matched = self.matches.len(), "chain reaction");
            self.phase = Phase::Resolving;
            self.scheduler
                .schedule(self.config.cascade_pause_ms, ScheduledTask::ClearMatches);
        }
    }

    fn finish(&mut self) {
        debug!(chain = self.chain_depth, "cascade settled");
        self.phase = Phase::Idle;
        self.chain_depth = 0;
    }
}
