//! Request parsing and dispatch for the interactive exerciser.
//!
//! A request is a line holding an option code and a position, e.g. `"1 0"` to
//! set bit 0. [`Session::apply`] runs a request against its bitmap and
//! returns the status line to show the user.

use crate::bitmap::BitMap;
use crate::error::{BitMapError, Region};
use crate::render::Grid;
use alloc::string::{String, ToString};
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use thiserror::Error;

/// An operation selectable from the exerciser menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `1`: set the bit at the position.
    Set,
    /// `2`: clear the bit at the position.
    Clear,
    /// `3`: report the bit at the position.
    Test,
    /// `4`: invert the whole bitmap; the position is ignored.
    InvertAll,
    /// `5`: invert the 1-based column given as position.
    InvertColumn,
    /// `6`: invert the 1-based row given as position.
    InvertRow,
    /// `-1`: leave the exerciser.
    Quit,
}

impl Op {
    /// Returns the menu code of the operation.
    pub const fn code(self) -> i64 {
        match self {
            Op::Set => 1,
            Op::Clear => 2,
            Op::Test => 3,
            Op::InvertAll => 4,
            Op::InvertColumn => 5,
            Op::InvertRow => 6,
            Op::Quit => -1,
        }
    }

    /// Returns `false` for operations that ignore their position.
    pub const fn takes_position(self) -> bool {
        !matches!(self, Op::InvertAll | Op::Quit)
    }
}

impl TryFrom<i64> for Op {
    type Error = CommandError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Op::Set,
            2 => Op::Clear,
            3 => Op::Test,
            4 => Op::InvertAll,
            5 => Op::InvertColumn,
            6 => Op::InvertRow,
            -1 => Op::Quit,
            _ => return Err(CommandError::UnknownOption(code)),
        })
    }
}

/// Errors produced while parsing a request line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line ended before a required field.
    #[error("expected an option and a position")]
    MissingField,
    /// A field is not an integer.
    #[error("`{0}` is not an integer")]
    InvalidNumber(String),
    /// The option code is not on the menu.
    #[error("unknown option {0}")]
    UnknownOption(i64),
    /// The line holds more than two fields.
    #[error("unexpected input `{0}` after the position")]
    TrailingInput(String),
}

/// One parsed exerciser request.
///
/// # Examples
/// ```
/// use block_bitmap::{Op, Request};
///
/// let request: Request = "5 2".parse().unwrap();
/// assert_eq!(request, Request { op: Op::InvertColumn, position: 2 });
///
/// // operations without a position may omit it
/// let quit: Request = "-1".parse().unwrap();
/// assert_eq!(quit.op, Op::Quit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// The selected operation.
    pub op: Op,
    /// Bit index, column or row, depending on `op`.
    pub position: i64,
}

fn parse_field(field: &str) -> Result<i64, CommandError> {
    field
        .parse()
        .map_err(|_| CommandError::InvalidNumber(field.to_string()))
}

impl FromStr for Request {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let op = Op::try_from(parse_field(fields.next().ok_or(CommandError::MissingField)?)?)?;
        let position = match fields.next() {
            Some(field) => parse_field(field)?,
            None if !op.takes_position() => 0,
            None => return Err(CommandError::MissingField),
        };
        if let Some(extra) = fields.next() {
            return Err(CommandError::TrailingInput(extra.to_string()));
        }
        Ok(Request { op, position })
    }
}

/// The outcome of one applied request, displayed as the exerciser's status
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The operation succeeded and has nothing to report.
    Done,
    /// The state of a tested bit.
    Bit {
        /// The tested index.
        position: i64,
        /// Whether the bit is set.
        set: bool,
    },
    /// A bit operation addressed an index outside the bitmap.
    OutOfRange {
        /// The operation that was rejected.
        op: Op,
        /// The rejected position.
        position: i64,
    },
    /// A column or row selector was outside `1..=max`.
    InvalidRegion {
        /// Which axis was selected.
        region: Region,
        /// The largest valid selector.
        max: usize,
    },
}

impl Status {
    /// Returns `true` if the status carries no message.
    pub fn is_silent(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Status::Done => Ok(()),
            Status::Bit {
                position,
                set: true,
            } => write!(f, "Bit {position} in the bitmap has been set."),
            Status::Bit {
                position,
                set: false,
            } => write!(f, "Bit {position} in the bitmap has not been set."),
            Status::OutOfRange {
                op: Op::Clear,
                position: _,
            } => f.write_str("Attempted to clear a bit outside of bitmap."),
            Status::OutOfRange {
                op: Op::Test,
                position,
            } => write!(f, "Attempted to test bit {position} outside of bitmap."),
            Status::OutOfRange {
                op: Op::Set,
                position,
            } => write!(f, "Attempted to set bit {position} outside of bitmap."),
            // only bit operations address an index; `Session::apply` never
            // reports these
            Status::OutOfRange {
                op: Op::InvertAll | Op::InvertColumn | Op::InvertRow | Op::Quit,
                position,
            } => write!(f, "Attempted to access bit {position} outside of bitmap."),
            Status::InvalidRegion { region, max } => {
                write!(f, "{region} selection must be between 1-{max}.")
            }
        }
    }
}

/// What the exerciser loop should do after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Show the status and the grid, then read the next request.
    Continue(Status),
    /// Stop reading requests.
    Quit,
}

/// A bitmap paired with the column count used to lay it out.
///
/// # Examples
/// ```
/// use block_bitmap::{Reply, Session, Status};
///
/// let mut session = Session::new(25, 5);
/// assert_eq!(session.apply("1 0".parse().unwrap()), Reply::Continue(Status::Done));
/// let reply = session.apply("3 0".parse().unwrap());
/// assert_eq!(reply, Reply::Continue(Status::Bit { position: 0, set: true }));
/// assert_eq!(session.grid().to_string().lines().next(), Some("1 0 0 0 0"));
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    bitmap: BitMap,
    columns: usize,
}

impl Session {
    /// Creates a session over a fresh bitmap of `bit_capacity` bits laid out
    /// in `columns` columns.
    pub fn new(bit_capacity: usize, columns: usize) -> Self {
        Self {
            bitmap: BitMap::new(bit_capacity),
            columns,
        }
    }

    /// Returns the bitmap.
    pub fn bitmap(&self) -> &BitMap {
        &self.bitmap
    }

    /// Returns the column count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns the row count for the session's column count.
    pub fn rows(&self) -> usize {
        self.bitmap.row_count(self.columns)
    }

    /// Returns a grid view of the current bitmap.
    pub fn grid(&self) -> Grid<'_> {
        Grid::new(&self.bitmap, self.columns)
    }

    /// Runs one request against the bitmap.
    ///
    /// Rejected requests leave the bitmap unchanged.
    pub fn apply(&mut self, request: Request) -> Reply {
        let Request { op, position } = request;
        // negative positions are never valid indices or selectors
        let target = usize::try_from(position).ok();

        let outcome = match (op, target) {
            (Op::Quit, _) => return Reply::Quit,
            (Op::InvertAll, _) => {
                self.bitmap.invert_all();
                Ok(Status::Done)
            }
            (Op::Set | Op::Clear | Op::Test, None) => {
                return Reply::Continue(Status::OutOfRange { op, position });
            }
            (Op::Set, Some(idx)) => self.bitmap.set(idx).map(|()| Status::Done),
            (Op::Clear, Some(idx)) => self.bitmap.clear(idx).map(|()| Status::Done),
            (Op::Test, Some(idx)) => self
                .bitmap
                .test(idx)
                .map(|set| Status::Bit { position, set }),
            (Op::InvertColumn, target) => self
                .bitmap
                .invert_column(self.columns, target.unwrap_or(0))
                .map(|()| Status::Done),
            (Op::InvertRow, target) => self
                .bitmap
                .invert_row(self.columns, target.unwrap_or(0))
                .map(|()| Status::Done),
        };

        Reply::Continue(match outcome {
            Ok(status) => status,
            Err(BitMapError::OutOfRange { .. }) => Status::OutOfRange { op, position },
            Err(BitMapError::InvalidRegion { region, max, .. }) => {
                Status::InvalidRegion { region, max }
            }
        })
    }
}
