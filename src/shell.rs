//! Line-oriented text shell over the game engine.
//!
//! The shell only forwards commands; everything it prints comes from
//! observers reacting to engine notifications.

use crate::config::{ConfigError, GameConfig, PlayerLabels};
use derive_more::{Display, Error};
use serde::Serialize;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use strictly_connect_four::{GameEngine, GameEvent, GameObserver, Piece, Player, Square};
use tracing::{debug, instrument, warn};

/// A parsed line of shell input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Drop a piece into the zero-based column.
    Drop(usize),
    /// Start over with an empty board.
    Restart,
    /// Leave the shell.
    Quit,
}

/// Input the shell could not understand.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ShellError {
    /// Blank input line.
    #[display("Enter a column number, 'r' to restart or 'q' to quit")]
    Empty,
    /// Columns are numbered from 1.
    #[display("Columns are numbered from 1")]
    ColumnZero,
    /// Anything else.
    #[display("Unknown command: {}", _0)]
    Unknown(#[error(not(source))] String),
}

impl ShellCommand {
    /// Parses one input line. Columns are entered 1-based.
    #[instrument]
    pub fn parse(line: &str) -> Result<Self, ShellError> {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => Err(ShellError::Empty),
            "r" | "restart" => Ok(ShellCommand::Restart),
            "q" | "quit" | "exit" => Ok(ShellCommand::Quit),
            other => match other.parse::<usize>() {
                Ok(0) => Err(ShellError::ColumnZero),
                Ok(column) => Ok(ShellCommand::Drop(column - 1)),
                Err(_) => Err(ShellError::Unknown(line.to_string())),
            },
        }
    }
}

/// Drives an engine from text commands.
#[derive(Debug)]
pub struct Shell {
    engine: GameEngine,
}

impl Shell {
    /// Creates a shell with a validated, not yet started engine.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: GameEngine::new(config.dimensions()?),
        })
    }

    /// Registers an observer on the underlying engine.
    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>)
    where
        O: GameObserver + 'static,
    {
        self.engine.subscribe(observer);
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Executes one command. Returns false when the shell should stop.
    #[instrument(skip(self, out))]
    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> std::io::Result<bool> {
        match command {
            ShellCommand::Drop(column) => {
                if let Err(e) = self.engine.drop_piece(column) {
                    writeln!(out, "{}", e)?;
                } else if self.engine.is_over() {
                    writeln!(out, "Enter 'r' to play again or 'q' to quit")?;
                }
            }
            ShellCommand::Restart => self.engine.restart(),
            ShellCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Starts the game and processes input lines until quit or end of input.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> std::io::Result<()> {
        self.engine.start();

        for line in input.lines() {
            let line = line?;
            match ShellCommand::parse(&line) {
                Ok(command) => {
                    debug!(?command, "Executing command");
                    if !self.execute(command, out)? {
                        break;
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            }
        }
        out.flush()
    }
}

/// Observer rendering the game as text.
///
/// Keeps its own picture of the grid, filled from `PieceDropped` events.
#[derive(Debug)]
pub struct TextView<W: Write> {
    out: W,
    labels: PlayerLabels,
    width: usize,
    height: usize,
    cells: Vec<Square>,
}

impl<W: Write> TextView<W> {
    /// Creates a view for a board of the configured size.
    ///
    /// Fails when the configured dimensions cannot form a board.
    pub fn new(config: &GameConfig, out: W) -> Result<Self, ConfigError> {
        let dimensions = config.dimensions()?;
        Ok(Self {
            out,
            labels: config.labels().clone(),
            width: dimensions.width(),
            height: dimensions.height(),
            cells: vec![Square::Empty; dimensions.cell_count()],
        })
    }

    /// Creates a view wrapped for registration.
    pub fn shared(config: &GameConfig, out: W) -> Result<Rc<RefCell<Self>>, ConfigError> {
        Ok(Rc::new(RefCell::new(Self::new(config, out)?)))
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Renders the current picture, top row first, with a column footer.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row.iter().map(|s| s.token().to_string()).collect();
            text.push_str(&line.join(" "));
            text.push('\n');
        }
        let footer: Vec<String> = (1..=self.width).map(|c| (c % 10).to_string()).collect();
        text.push_str(&footer.join(" "));
        text
    }

    fn place(&mut self, piece: Piece) {
        if piece.column() < self.width && piece.row() < self.height {
            self.cells[piece.row() * self.width + piece.column()] = Square::Occupied(piece.player());
        }
    }

    fn label(&self, player: Player) -> &str {
        self.labels.for_player(player)
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!(error = %e, "Failed to write to view");
        }
    }
}

impl<W: Write> GameObserver for TextView<W> {
    fn game_started(&mut self) {
        self.cells.fill(Square::Empty);
        let board = self.render();
        self.write("New game");
        self.write(&board);
    }

    fn turn_changed(&mut self, player: Player) {
        let prompt = format!("{} ({}), choose a column:", self.label(player), player.token());
        self.write(&prompt);
    }

    fn piece_dropped(&mut self, piece: Option<Piece>) {
        match piece {
            Some(piece) => {
                self.place(piece);
                let board = self.render();
                self.write(&board);
            }
            None => self.write("Column full, pick another"),
        }
    }

    fn game_won(&mut self, player: Player) {
        let message = format!("{} won!!!", self.label(player));
        self.write(&message);
    }

    fn game_draw(&mut self) {
        self.write("Draw!");
    }
}

/// Observer streaming each event as one JSON line.
pub struct JsonEventWriter<W: Write> {
    out: W,
    seq: u64,
}

#[derive(Serialize)]
struct EventLine<'a> {
    seq: u64,
    event: &'a GameEvent,
}

impl<W: Write> JsonEventWriter<W> {
    /// Creates a writer wrapped for registration.
    pub fn shared(out: W) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { out, seq: 0 }))
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> GameObserver for JsonEventWriter<W> {
    fn on_event(&mut self, event: &GameEvent) {
        let line = EventLine {
            seq: self.seq,
            event,
        };
        self.seq += 1;
        let result = serde_json::to_writer(&mut self.out, &line)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            warn!(error = %e, "Failed to write event");
        }
    }
}
