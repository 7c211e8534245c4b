//! Tic-tac-toe oracle - exhaustive perfect-play labeling
//!
//! This library enumerates every position reachable in legal play, solves
//! each one with memoized alpha-beta minimax, and writes the results as a
//! labeled text dataset.
//!
//! # Architecture
//!
//! - **Types**: Board, squares, players and cell positions
//! - **Rules**: Terminal classification and the legality filter
//! - **Solver**: Pruned, cached minimax plus an unpruned reference oracle
//! - **Enumerate**: Finding and labeling all legal positions
//! - **Dataset**: Record layouts, filters and the file writer
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_oracle::{DatasetOptions, Solver, Strategy, enumerate, write_dataset};
//!
//! # fn example() -> Result<(), tictactoe_oracle::DatasetError> {
//! let mut solver = Solver::new();
//! let states = enumerate(Strategy::MoveTree, &mut solver);
//! let summary = write_dataset(
//!     "tic-tac-toe-minimax-complete.data".as_ref(),
//!     &states,
//!     DatasetOptions::default(),
//! )?;
//! assert_eq!(summary.records, 5478);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod position;
mod types;

// Public module declarations
pub mod dataset;
pub mod enumerate;
pub mod error;
pub mod invariants;
pub mod rules;
pub mod score;
pub mod solver;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{BOARD_CODES, Board, BoardParseError, Player, Square};

// Crate-level exports - Rules
pub use rules::{TerminalOutcome, classify, is_legal, legality_violations};

// Crate-level exports - Solver
pub use solver::{CacheStats, MemoCache, MemoKey, SolvedEntry, Solver};

// Crate-level exports - Enumeration
pub use enumerate::{
    LEGAL_STATES, LabeledState, Strategy, TERMINAL_STATES, enumerate, enumerate_parallel,
};

// Crate-level exports - Dataset output
pub use dataset::{
    DatasetOptions, DatasetSummary, DatasetWriter, Label, Record, RecordLayout, StateFilter,
    write_dataset,
};
pub use error::{DatasetError, DatasetErrorKind};
