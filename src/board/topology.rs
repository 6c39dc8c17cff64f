use crate::core::{BoardConfig, Color, Position};

/// Integer code for a piece at home in the front-end encoding.
pub const HOME_CODE: i32 = -1;

/// Ring and lane layout for one game.
///
/// A piece's *progress* is the number of steps it has taken since entering:
///
/// | progress                          | position            |
/// |-----------------------------------|---------------------|
/// | `0`                               | entry cell          |
/// | `ring_length - 1`                 | exit cell           |
/// | `ring_length .. ring_length + L`  | safe lane `0 .. L`  |
/// | `ring_length + L`                 | finished            |
///
/// ```
/// use ki_nevet::board::Board;
/// use ki_nevet::core::{BoardConfig, Color, Position};
///
/// let board = Board::new(&BoardConfig::default());
/// assert_eq!(board.entry_cell(Color::Blue), 13);
/// assert_eq!(board.exit_cell(Color::Blue), 12);
/// assert_eq!(board.advance(Color::Blue, Position::Ring(12), 1), Some(Position::Lane(0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    ring_length: u16,
    lane_length: u16,
}

impl Board {
    /// Build the topology for a validated board configuration.
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            ring_length: config.ring_length,
            lane_length: config.lane_length,
        }
    }

    /// Cells on the shared ring.
    #[must_use]
    pub fn ring_length(self) -> u16 {
        self.ring_length
    }

    /// Cells in each safe lane.
    #[must_use]
    pub fn lane_length(self) -> u16 {
        self.lane_length
    }

    fn quadrant_length(self) -> u16 {
        self.ring_length / Color::ALL.len() as u16
    }

    /// Ring cell a piece of `color` occupies when it leaves home.
    #[must_use]
    pub fn entry_cell(self, color: Color) -> u16 {
        color.quadrant() * self.quadrant_length()
    }

    /// Last ring cell before `color` turns into its safe lane.
    #[must_use]
    pub fn exit_cell(self, color: Color) -> u16 {
        self.ring_cell(color, self.ring_length - 1)
    }

    /// Whether `cell` is the entry cell of any color.
    #[must_use]
    pub fn is_entry_cell(self, cell: u16) -> bool {
        cell < self.ring_length && cell % self.quadrant_length() == 0
    }

    /// Absolute ring cell `offset` steps past `color`'s entry cell.
    #[must_use]
    pub fn ring_cell(self, color: Color, offset: u16) -> u16 {
        let ring = u32::from(self.ring_length);
        ((u32::from(self.entry_cell(color)) + u32::from(offset)) % ring) as u16
    }

    /// Next cell after safe lane cell `lane`, or `Finished` at the lane's end.
    #[must_use]
    pub fn next_lane_cell(self, lane: u16) -> Position {
        if lane + 1 < self.lane_length {
            Position::Lane(lane + 1)
        } else {
            Position::Finished
        }
    }

    /// Progress value of the terminal marker.
    #[must_use]
    pub fn finish_progress(self) -> u16 {
        self.ring_length + self.lane_length
    }

    /// Steps taken since entering. `None` for a piece at home.
    #[must_use]
    pub fn progress(self, color: Color, position: Position) -> Option<u16> {
        match position {
            Position::Home => None,
            Position::Ring(cell) => {
                let ring = u32::from(self.ring_length);
                let entry = u32::from(self.entry_cell(color));
                Some(((u32::from(cell) + ring - entry) % ring) as u16)
            }
            Position::Lane(lane) => Some(self.ring_length + lane),
            Position::Finished => Some(self.finish_progress()),
        }
    }

    /// Position of a `color` piece that has taken `progress` steps.
    ///
    /// `None` past the terminal marker.
    #[must_use]
    pub fn position_at(self, color: Color, progress: u16) -> Option<Position> {
        if progress < self.ring_length {
            Some(Position::Ring(self.ring_cell(color, progress)))
        } else if progress < self.finish_progress() {
            Some(Position::Lane(progress - self.ring_length))
        } else if progress == self.finish_progress() {
            Some(Position::Finished)
        } else {
            None
        }
    }

    /// Move an entered piece `steps` forward.
    ///
    /// Returns `None` for pieces at home or when the move would overshoot
    /// the terminal marker.
    #[must_use]
    pub fn advance(self, color: Color, position: Position, steps: u16) -> Option<Position> {
        let progress = self.progress(color, position)?;
        self.position_at(color, progress.checked_add(steps)?)
    }

    /// Whether `position` exists on this board.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        match position {
            Position::Home | Position::Finished => true,
            Position::Ring(cell) => cell < self.ring_length,
            Position::Lane(lane) => lane < self.lane_length,
        }
    }

    /// Front-end integer code: `-1` home, `0..ring` ring cells, then the
    /// safe lane, then the terminal marker.
    #[must_use]
    pub fn encode(self, position: Position) -> i32 {
        let ring = i32::from(self.ring_length);
        match position {
            Position::Home => HOME_CODE,
            Position::Ring(cell) => i32::from(cell),
            Position::Lane(lane) => ring + i32::from(lane),
            Position::Finished => ring + i32::from(self.lane_length),
        }
    }

    /// Inverse of `encode`. `None` for codes outside the board.
    #[must_use]
    pub fn decode(self, code: i32) -> Option<Position> {
        let ring = i32::from(self.ring_length);
        let finished = ring + i32::from(self.lane_length);
        match code {
            HOME_CODE => Some(Position::Home),
            c if (0..ring).contains(&c) => Some(Position::Ring(c as u16)),
            c if (ring..finished).contains(&c) => Some(Position::Lane((c - ring) as u16)),
            c if c == finished => Some(Position::Finished),
            _ => None,
        }
    }
}
