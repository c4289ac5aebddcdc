//! Hex board model with incremental win detection.
//!
//! WHITE owns the top and bottom rows, BLACK owns the left and right
//! columns. Each player has a [`UnionFind`] over its stones plus two edge
//! sentinels, so deciding the game is a single connectivity query.

use std::fmt;
use std::str::FromStr;

use crate::{union_find::UnionFind, HexError, Result};

/// Offsets of the six hexagonal neighbours of a cell.
pub const NEIGHBOR_PATTERNS: [(isize, isize); 6] = [(-1, 0), (0, -1), (-1, 1), (0, 1), (1, 0), (1, -1)];

/// Owner of a cell, or the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Player {
    /// Empty cell / no winner yet
    #[default]
    None = 0,
    /// Connects row 0 to row `size - 1`
    White = 1,
    /// Connects column 0 to column `size - 1`
    Black = 2,
}

impl Player {
    /// The other colour. `None` stays `None`.
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
            Player::None => Player::None,
        }
    }

    /// Returns true for `Player::None`.
    pub fn is_none(self) -> bool {
        self == Player::None
    }

    /// Numeric id: 0 for none, 1 for white, 2 for black.
    pub fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = HexError;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Player::None),
            1 => Ok(Player::White),
            2 => Ok(Player::Black),
            other => Err(HexError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Player::None => "none",
            Player::White => "white",
            Player::Black => "black",
        };
        f.write_str(name)
    }
}

/// A board position, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

/// Letter-number notation: the letter is the column, the number is `row + 1`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_label(self.col), self.row + 1)
    }
}

impl FromStr for Cell {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || HexError::InvalidCell(s.to_string());

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() {
            return Err(invalid());
        }

        // Bijective base 26: a..z, aa..az, ba..
        let mut col: usize = 0;
        for letter in letters.bytes() {
            let digit = (letter.to_ascii_lowercase() - b'a') as usize + 1;
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(digit))
                .ok_or_else(invalid)?;
        }

        let row: usize = digits.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }
        Ok(Cell::new(row - 1, col - 1))
    }
}

/// Column letters: `a`..`z`, then `aa`, `ab`, .. like spreadsheet columns.
fn column_label(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Element of a player's union-find: a real cell or one of the two edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Point {
    Cell(Cell),
    /// Row 0 for white, column 0 for black
    EdgeA,
    /// Row `size - 1` for white, column `size - 1` for black
    EdgeB,
}

/// Current position of a game of Hex.
#[derive(Debug, Clone)]
pub struct GameState {
    size: usize,
    to_play: Player,
    board: Vec<Player>,
    white_played: usize,
    black_played: usize,
    white_groups: UnionFind<Point>,
    black_groups: UnionFind<Point>,
}

impl GameState {
    /// Creates an empty `size` x `size` board with white to move.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        GameState {
            size,
            to_play: Player::White,
            board: vec![Player::None; size * size],
            white_played: 0,
            black_played: 0,
            white_groups: UnionFind::with_ignored([Point::EdgeA, Point::EdgeB]),
            black_groups: UnionFind::with_ignored([Point::EdgeA, Point::EdgeB]),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, cell: Cell) -> Result<usize> {
        if cell.row < self.size && cell.col < self.size {
            Ok(cell.row * self.size + cell.col)
        } else {
            Err(HexError::OutOfBounds {
                cell,
                size: self.size,
            })
        }
    }

    /// Owner of `cell`, or `None` (the `Option`) when it is off the board.
    pub fn owner(&self, cell: Cell) -> Option<Player> {
        self.index(cell).ok().map(|i| self.board[i])
    }

    /// Plays a stone for the side to move and passes the turn.
    pub fn play(&mut self, cell: Cell) -> Result<()> {
        match self.to_play {
            Player::White => {
                self.place_white(cell)?;
                self.to_play = Player::Black;
            }
            Player::Black => {
                self.place_black(cell)?;
                self.to_play = Player::White;
            }
            Player::None => return Err(HexError::InvalidTurn(Player::None.id())),
        }
        Ok(())
    }

    /// Places a white stone regardless of whose turn it is.
    pub fn place_white(&mut self, cell: Cell) -> Result<()> {
        self.place(cell, Player::White)
    }

    /// Places a black stone regardless of whose turn it is.
    pub fn place_black(&mut self, cell: Cell) -> Result<()> {
        self.place(cell, Player::Black)
    }

    fn place(&mut self, cell: Cell, color: Player) -> Result<()> {
        let idx = self.index(cell)?;
        if self.board[idx] != Player::None {
            return Err(HexError::CellOccupied { cell });
        }
        self.board[idx] = color;

        let (axis, groups) = match color {
            Player::White => {
                self.white_played += 1;
                (cell.row, &mut self.white_groups)
            }
            Player::Black => {
                self.black_played += 1;
                (cell.col, &mut self.black_groups)
            }
            Player::None => return Err(HexError::InvalidTurn(Player::None.id())),
        };

        let point = Point::Cell(cell);
        // Registers the stone even when it touches nothing yet.
        groups.find(point);
        if axis == 0 {
            groups.join(Point::EdgeA, point);
        }
        if axis == self.size - 1 {
            groups.join(Point::EdgeB, point);
        }

        let size = self.size;
        let board = &self.board;
        for n in neighbor_cells(size, cell) {
            if board[n.row * size + n.col] == color {
                groups.join(Point::Cell(n), point);
            }
        }
        Ok(())
    }

    /// Returns true if `color` playing at `cell` would connect both of its
    /// edges, i.e. complete that colour's chain. The board is not modified.
    pub fn would_lose(&self, cell: Cell, color: Player) -> bool {
        let (axis, groups) = match color {
            Player::White => (cell.row, &self.white_groups),
            Player::Black => (cell.col, &self.black_groups),
            Player::None => return false,
        };

        let mut connect_a = axis == 0;
        let mut connect_b = axis == self.size - 1;
        for n in neighbor_cells(self.size, cell) {
            let point = Point::Cell(n);
            if !groups.contains(point) {
                continue;
            }
            if groups.same_set(Point::EdgeA, point) {
                connect_a = true;
            } else if groups.same_set(Point::EdgeB, point) {
                connect_b = true;
            }
        }
        connect_a && connect_b
    }

    /// Player to move.
    pub fn turn(&self) -> Player {
        self.to_play
    }

    /// Sets the player to move. Only white or black are accepted.
    pub fn set_turn(&mut self, player: Player) -> Result<()> {
        if player.is_none() {
            return Err(HexError::InvalidTurn(player.id()));
        }
        self.to_play = player;
        Ok(())
    }

    /// The colour whose edges are connected, or `Player::None`.
    pub fn winner(&self) -> Player {
        if self.white_groups.same_set(Point::EdgeA, Point::EdgeB) {
            Player::White
        } else if self.black_groups.same_set(Point::EdgeA, Point::EdgeB) {
            Player::Black
        } else {
            Player::None
        }
    }

    /// Returns true once either player has connected their edges.
    pub fn is_terminal(&self) -> bool {
        !self.winner().is_none()
    }

    /// On-board hexagonal neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        neighbor_cells(self.size, cell).collect()
    }

    /// Every empty cell, column-major: each column is scanned top to bottom.
    pub fn moves(&self) -> Vec<Cell> {
        let mut moves = Vec::with_capacity(self.board.len());
        for col in 0..self.size {
            for row in 0..self.size {
                if self.board[row * self.size + col] == Player::None {
                    moves.push(Cell::new(row, col));
                }
            }
        }
        moves
    }

    /// Cells holding a stone of `color`, row by row.
    pub fn stones(&self, color: Player) -> Vec<Cell> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, &owner)| owner == color)
            .map(|(i, _)| Cell::new(i / self.size, i % self.size))
            .collect()
    }

    /// Stones placed so far by `color`.
    pub fn num_played(&self, color: Player) -> usize {
        match color {
            Player::White => self.white_played,
            Player::Black => self.black_played,
            Player::None => 0,
        }
    }

    /// Connected white chains, each sorted, edges left out.
    pub fn white_groups(&self) -> Vec<Vec<Cell>> {
        collect_groups(&self.white_groups)
    }

    /// Connected black chains, each sorted, edges left out.
    pub fn black_groups(&self) -> Vec<Vec<Cell>> {
        collect_groups(&self.black_groups)
    }
}

fn neighbor_cells(size: usize, cell: Cell) -> impl Iterator<Item = Cell> {
    NEIGHBOR_PATTERNS.iter().filter_map(move |&(dr, dc)| {
        let row = cell.row.checked_add_signed(dr)?;
        let col = cell.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Cell::new(row, col))
    })
}

fn collect_groups(uf: &UnionFind<Point>) -> Vec<Vec<Cell>> {
    let mut groups: Vec<Vec<Cell>> = uf
        .groups()
        .values()
        .map(|members| {
            let mut cells: Vec<Cell> = members
                .iter()
                .filter_map(|p| match p {
                    Point::Cell(c) => Some(*c),
                    _ => None,
                })
                .collect();
            cells.sort();
            cells
        })
        .filter(|cells| !cells.is_empty())
        .collect();
    groups.sort();
    groups
}

/// ASCII view: column letters on top, row numbers on the left, each row
/// shifted one step right. `B` marks black's right edge and the trailing
/// row of `W` marks white's bottom edge.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.to_string().len();

        let letters: Vec<String> = (0..self.size).map(column_label).collect();
        writeln!(f, "{}{}", " ".repeat(width + 1), letters.join(" "))?;

        for row in 0..self.size {
            let cells: Vec<&str> = (0..self.size)
                .map(|col| match self.board[row * self.size + col] {
                    Player::White => "W",
                    Player::Black => "B",
                    Player::None => ".",
                })
                .collect();
            writeln!(
                f,
                "{}{:>width$} {} B",
                " ".repeat(row),
                row + 1,
                cells.join(" "),
                width = width
            )?;
        }

        let markers = vec!["W"; self.size];
        write!(f, "{}{}", " ".repeat(self.size + width + 1), markers.join(" "))
    }
}
