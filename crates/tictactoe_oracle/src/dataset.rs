//! Text serialization of labeled positions.
//!
//! One record per line, comma separated, in a fixed field order:
//!
//! ```text
//! c0,c1,c2,c3,c4,c5,c6,c7,c8,label[,side,best_move]
//! ```
//!
//! Cells are `x`, `o` or `b` (blank) in board order. The label is the
//! perfect-play outcome from X's perspective: `win`, `lose` or `draw`. The
//! two trailing fields appear only in [`RecordLayout::Annotated`]; terminal
//! positions write `-` for both.

use crate::enumerate::LabeledState;
use crate::error::{DatasetError, DatasetErrorKind};
use crate::score::{self, Score};
use crate::{Player, Position, Square};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Outcome label, always from X's perspective.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Label {
    /// X wins under perfect play.
    Win,
    /// O wins under perfect play.
    Lose,
    /// Neither side can force a win.
    Draw,
}

impl Label {
    /// Label for an X-relative score.
    pub fn from_score(value: Score) -> Self {
        match value.cmp(&score::DRAWN) {
            Ordering::Greater => Label::Win,
            Ordering::Less => Label::Lose,
            Ordering::Equal => Label::Draw,
        }
    }
}

/// Which fields each record carries.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RecordLayout {
    /// Nine cells and the label.
    #[default]
    Labeled,
    /// Nine cells, the label, the side to move and the best move.
    Annotated,
}

/// Which positions are written.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StateFilter {
    /// Finished and unfinished games.
    #[default]
    All,
    /// Finished games only.
    Terminal,
    /// Games still in play only.
    NonTerminal,
}

impl StateFilter {
    /// Whether `state` passes this filter.
    pub fn admits(self, state: &LabeledState) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Terminal => state.is_terminal(),
            StateFilter::NonTerminal => !state.is_terminal(),
        }
    }

    /// Conventional output file name for datasets of this kind.
    pub fn default_file_name(self) -> &'static str {
        match self {
            StateFilter::All => "tic-tac-toe-minimax-complete.data",
            StateFilter::Terminal => "tic-tac-toe-minimax-terminal.data",
            StateFilter::NonTerminal => "tic-tac-toe-minimax-non-terminal.data",
        }
    }
}

/// Emission settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_new::new)]
pub struct DatasetOptions {
    /// Fields per record.
    pub layout: RecordLayout,
    /// Positions to include.
    pub filter: StateFilter,
}

/// One dataset line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    cells: [Square; 9],
    label: Label,
    side_to_move: Option<Player>,
    best_move: Option<Position>,
}

impl Record {
    /// The label of this record.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Renders the record without a line terminator.
    pub fn line(&self, layout: RecordLayout) -> String {
        let mut fields: Vec<String> = self.cells.iter().map(|sq| sq.symbol().to_string()).collect();
        fields.push(self.label.to_string());

        if layout == RecordLayout::Annotated {
            fields.push(
                self.side_to_move
                    .map_or_else(|| "-".to_string(), |p| p.symbol().to_string()),
            );
            fields.push(
                self.best_move
                    .map_or_else(|| "-".to_string(), |pos| pos.to_index().to_string()),
            );
        }
        fields.join(",")
    }
}

impl From<&LabeledState> for Record {
    fn from(state: &LabeledState) -> Self {
        Self {
            cells: *state.board.squares(),
            label: Label::from_score(state.score()),
            side_to_move: state.side_to_move,
            best_move: state.solved.best_move,
        }
    }
}

/// Counts of what a dataset contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Lines written.
    pub records: usize,
    /// Records of finished games.
    pub terminal: usize,
    /// Records of games still in play.
    pub non_terminal: usize,
    /// Records labeled `win`.
    pub wins: usize,
    /// Records labeled `lose`.
    pub losses: usize,
    /// Records labeled `draw`.
    pub draws: usize,
}

impl DatasetSummary {
    fn count(&mut self, state: &LabeledState, label: Label) {
        self.records += 1;
        if state.is_terminal() {
            self.terminal += 1;
        } else {
            self.non_terminal += 1;
        }
        match label {
            Label::Win => self.wins += 1,
            Label::Lose => self.losses += 1,
            Label::Draw => self.draws += 1,
        }
    }
}

/// Buffered record writer.
pub struct DatasetWriter<W: Write> {
    out: BufWriter<W>,
    options: DatasetOptions,
    summary: DatasetSummary,
}

impl<W: Write> DatasetWriter<W> {
    /// Wraps `inner`; nothing is written until the first [`emit`](Self::emit).
    pub fn new(inner: W, options: DatasetOptions) -> Self {
        Self {
            out: BufWriter::new(inner),
            options,
            summary: DatasetSummary::default(),
        }
    }

    /// Writes `state` if the filter admits it. Returns whether a line was written.
    pub fn emit(&mut self, state: &LabeledState) -> Result<bool, DatasetError> {
        if !self.options.filter.admits(state) {
            return Ok(false);
        }
        let record = Record::from(state);
        writeln!(self.out, "{}", record.line(self.options.layout))?;
        self.summary.count(state, record.label());
        Ok(true)
    }

    /// Flushes buffered records and returns what was written.
    pub fn finish(mut self) -> Result<DatasetSummary, DatasetError> {
        self.out.flush()?;
        debug!(records = self.summary.records, "dataset flushed");
        Ok(self.summary)
    }
}

/// Writes `states` to a new file at `path`, replacing any existing file.
#[instrument(skip(states), fields(path = %path.display(), states = states.len()))]
pub fn write_dataset(
    path: &Path,
    states: &[LabeledState],
    options: DatasetOptions,
) -> Result<DatasetSummary, DatasetError> {
    let file = File::create(path).map_err(|e| {
        DatasetError::new(DatasetErrorKind::Create {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })?;

    let mut writer = DatasetWriter::new(file, options);
    for state in states {
        writer.emit(state)?;
    }
    let summary = writer.finish()?;

    info!(
        records = summary.records,
        wins = summary.wins,
        losses = summary.losses,
        draws = summary.draws,
        "dataset written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;
    use crate::solver::Solver;

    fn labeled(s: &str) -> LabeledState {
        LabeledState::label(s.parse::<Board>().unwrap(), &mut Solver::new())
    }

    #[test]
    fn test_label_from_score() {
        assert_eq!(Label::from_score(score::X_WINS), Label::Win);
        assert_eq!(Label::from_score(score::O_WINS), Label::Lose);
        assert_eq!(Label::from_score(score::DRAWN), Label::Draw);
        assert_eq!(Label::Lose.to_string(), "lose");
    }

    #[test]
    fn test_labeled_line() {
        let record = Record::from(&labeled("xxx oob bbb"));
        assert_eq!(record.line(RecordLayout::Labeled), "x,x,x,o,o,b,b,b,b,win");
    }

    #[test]
    fn test_annotated_line_non_terminal() {
        let record = Record::from(&labeled("bbx oob xxb"));
        assert_eq!(
            record.line(RecordLayout::Annotated),
            "b,b,x,o,o,b,x,x,b,lose,o,5"
        );
    }

    #[test]
    fn test_annotated_line_terminal_uses_placeholders() {
        let record = Record::from(&labeled("xox xoo oxx"));
        assert_eq!(
            record.line(RecordLayout::Annotated),
            "x,o,x,x,o,o,o,x,x,draw,-,-"
        );
    }

    #[test]
    fn test_filter_and_summary() {
        let states = [labeled("xxx oob bbb"), labeled("bbb bbb bbb")];
        let options = DatasetOptions::new(RecordLayout::Labeled, StateFilter::NonTerminal);
        let mut writer = DatasetWriter::new(Vec::new(), options);
        assert!(!writer.emit(&states[0]).unwrap());
        assert!(writer.emit(&states[1]).unwrap());
        let summary = writer.finish().unwrap();
        assert_eq!(summary.records, 1);
        assert_eq!(summary.non_terminal, 1);
        assert_eq!(summary.draws, 1);
    }

    #[test]
    fn test_default_file_names_follow_filter() {
        assert_eq!(
            StateFilter::NonTerminal.default_file_name(),
            "tic-tac-toe-minimax-non-terminal.data"
        );
        assert_eq!(
            "non-terminal".parse::<StateFilter>().unwrap(),
            StateFilter::NonTerminal
        );
    }
}
