//! Line protocol: the initial cell block, then one block per turn, answered
//! with exactly one move line.

use std::io::{BufRead, Lines, Write};
use std::str::{FromStr, SplitWhitespace};

use anyhow::{anyhow, Context, Result};
use photosynth_core::{GameState, TurnStats, UtilityAgent};

/// One input line with its 1-based position, for error messages
struct Line {
    text: String,
    number: usize,
}

impl Line {
    fn fields(&self) -> Fields<'_> {
        Fields {
            tokens: self.text.split_whitespace(),
            line: self,
        }
    }
}

struct Fields<'a> {
    tokens: SplitWhitespace<'a>,
    line: &'a Line,
}

impl Fields<'_> {
    fn next<T>(&mut self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let line = self.line;
        let token = self
            .tokens
            .next()
            .with_context(|| format!("line {}: missing {} in {:?}", line.number, name, line.text))?;
        token
            .parse()
            .map_err(|e| anyhow!("line {}: invalid {} {:?}: {}", line.number, name, token, e))
    }

    /// `0` is false, any other integer is true
    fn flag(&mut self, name: &str) -> Result<bool> {
        Ok(self.next::<i64>(name)? != 0)
    }
}

struct Input<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> Input<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    /// Next line, `None` at end of input
    fn next(&mut self) -> Result<Option<Line>> {
        match self.lines.next() {
            None => Ok(None),
            Some(text) => {
                self.line_number += 1;
                let text = text.with_context(|| format!("cannot read line {}", self.line_number))?;
                Ok(Some(Line {
                    text,
                    number: self.line_number,
                }))
            }
        }
    }

    /// Next line inside a block, where end of input is an error
    fn require(&mut self, what: &str) -> Result<Line> {
        self.next()?.with_context(|| {
            format!(
                "unexpected end of input at line {}: expected {}",
                self.line_number + 1,
                what
            )
        })
    }
}

/// Drive the agent until the input closes. Returns the number of turns answered.
pub fn run<R: BufRead, W: Write>(reader: R, mut writer: W, agent: &UtilityAgent) -> Result<usize> {
    let mut input = Input::new(reader);

    let Some(header) = input.next()? else {
        tracing::warn!("empty input, no board received");
        return Ok(0);
    };
    let num_cells: usize = header.fields().next("number of cells")?;
    let mut state = GameState::create_empty(num_cells)
        .with_context(|| format!("line {}: cannot build the board", header.number))?;

    for _ in 0..num_cells {
        let line = input.require("cell")?;
        let mut fields = line.fields();
        let cell_id: usize = fields.next("cell id")?;
        let richness: u8 = fields.next("richness")?;
        // the six neighbour ids that follow are derived from the geometry instead
        state
            .set_richness(cell_id, richness)
            .with_context(|| format!("line {}", line.number))?;
    }
    tracing::debug!(num_cells, usable = state.board.num_usable_cells(), "board ready");

    let mut turns = 0;
    while let Some(day_line) = input.next()? {
        state.reset_for_turn();
        read_turn(&mut input, &mut state, &day_line)?;

        let legal_moves = read_legal_moves(&mut input)?;
        let action = agent
            .choose_move(&state, &legal_moves)
            .with_context(|| format!("choosing a move on day {}", state.day))?;

        writeln!(writer, "{}", action).context("cannot write move")?;
        writer.flush().context("cannot flush move")?;
        turns += 1;
    }

    Ok(turns)
}

fn read_turn<R: BufRead>(input: &mut Input<R>, state: &mut GameState, day_line: &Line) -> Result<()> {
    let day = day_line.fields().next("day")?;
    let nutrients = input.require("nutrients")?.fields().next("nutrients")?;

    let mine = input.require("own sun and score")?;
    let mut fields = mine.fields();
    let my_sun = fields.next("own sun")?;
    let my_score = fields.next("own score")?;

    let theirs = input.require("opponent sun, score and waiting flag")?;
    let mut fields = theirs.fields();
    let opp_sun = fields.next("opponent sun")?;
    let opp_score = fields.next("opponent score")?;
    let opp_is_waiting = fields.flag("opponent waiting flag")?;

    state.set_stats_for_turn(TurnStats {
        day,
        nutrients,
        my_sun,
        my_score,
        opp_sun,
        opp_score,
        opp_is_waiting,
    });

    let num_trees: usize = input.require("number of trees")?.fields().next("number of trees")?;
    for _ in 0..num_trees {
        let line = input.require("tree")?;
        let mut fields = line.fields();
        let cell_id: usize = fields.next("tree cell id")?;
        let size: u8 = fields.next("tree size")?;
        let is_mine = fields.flag("tree owner flag")?;
        let is_dormant = fields.flag("tree dormant flag")?;
        state
            .set_tree(cell_id, size, is_mine, is_dormant)
            .with_context(|| format!("line {}", line.number))?;
    }

    Ok(())
}

fn read_legal_moves<R: BufRead>(input: &mut Input<R>) -> Result<Vec<String>> {
    let num_moves: usize = input.require("number of legal moves")?.fields().next("number of legal moves")?;
    let mut moves = Vec::with_capacity(num_moves);
    for _ in 0..num_moves {
        moves.push(input.require("legal move")?.text.trim().to_string());
    }
    Ok(moves)
}
