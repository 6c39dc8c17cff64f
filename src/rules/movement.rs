//! Piece movement: legal moves, captures and safe-lane transitions.
//!
//! ## Rules
//!
//! - A piece at home enters on a 6, onto its color's entry cell.
//! - An entered piece advances by the roll. Overshooting the terminal
//!   marker is illegal; the lane must be finished exactly.
//! - Landing on a ring cell where one opposing color has two or more
//!   pieces (a blockade) is illegal.
//! - Landing on a ring cell held by exactly one opposing piece captures it,
//!   unless the cell is an entry cell and entry cells are safe.
//! - Safe-lane cells are private to their color, so nothing interacts there.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::core::{Color, GameState, HouseRules, PieceId, PlayerId, Position, DIE_FACES};
use crate::error::{GameError, MoveRejection};
use crate::events::{Events, PointAward};

/// Pieces that may move for a roll. Sized for the usual four pieces.
pub type LegalMoves = SmallVec<[PieceId; 4]>;

/// What a resolved move did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Left home onto the entry cell.
    Entered,
    /// Moved along the ring or within the safe lane.
    Advanced,
    /// Landed on a lone opposing piece and sent it home.
    Captured { victim: PieceId, owner: PlayerId },
    /// Turned off the ring into the safe lane.
    EnteredSafeLane,
    /// Completed the safe lane.
    ReachedHome,
}

/// Result of `apply_move`.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    /// Snapshot after the move. Turn bookkeeping is left to the caller.
    pub state: GameState,
    pub kind: MoveKind,
    pub from: Position,
    pub to: Position,
    /// Capture awards, in order.
    pub events: Events,
}

/// Index of who stands on which ring cell.
struct Occupancy {
    cells: FxHashMap<u16, SmallVec<[(PlayerId, PieceId); 4]>>,
}

impl Occupancy {
    fn of(state: &GameState) -> Self {
        let mut cells: FxHashMap<u16, SmallVec<[(PlayerId, PieceId); 4]>> = FxHashMap::default();
        for (owner, piece) in state.pieces() {
            if let Some(cell) = piece.position.ring_cell() {
                cells.entry(cell).or_default().push((owner, piece.id));
            }
        }
        Self { cells }
    }

    fn opponents_at(
        &self,
        cell: u16,
        mover: PlayerId,
    ) -> impl Iterator<Item = (PlayerId, PieceId)> + '_ {
        self.cells
            .get(&cell)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |(owner, _)| *owner != mover)
    }

    /// Some single opposing player has two or more pieces on `cell`.
    fn is_blockade(&self, cell: u16, mover: PlayerId) -> bool {
        let mut per_owner: SmallVec<[(PlayerId, u8); 4]> = SmallVec::new();
        for (owner, _) in self.opponents_at(cell, mover) {
            match per_owner.iter_mut().find(|(o, _)| *o == owner) {
                Some((_, count)) => {
                    *count += 1;
                    if *count >= 2 {
                        return true;
                    }
                }
                None => per_owner.push((owner, 1)),
            }
        }
        false
    }

    /// The only opposing piece on `cell`, if there is exactly one.
    fn lone_opponent(&self, cell: u16, mover: PlayerId) -> Option<(PlayerId, PieceId)> {
        let mut opponents = self.opponents_at(cell, mover);
        let first = opponents.next()?;
        match opponents.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

/// Where a piece at `position` would land, or why it cannot move.
fn target(
    board: Board,
    rules: &HouseRules,
    occupancy: &Occupancy,
    player: PlayerId,
    color: Color,
    position: Position,
    dice: u8,
) -> Result<Position, MoveRejection> {
    if !(1..=DIE_FACES).contains(&dice) {
        return Err(MoveRejection::NotADieFace(dice));
    }
    let destination = match position {
        Position::Finished => return Err(MoveRejection::AlreadyFinished),
        Position::Home if dice == DIE_FACES => Position::Ring(board.entry_cell(color)),
        Position::Home => return Err(MoveRejection::NeedsSix),
        entered => board
            .advance(color, entered, u16::from(dice))
            .ok_or(MoveRejection::Overshoot)?,
    };

    if let Position::Ring(cell) = destination {
        if rules.blockades && occupancy.is_blockade(cell, player) {
            return Err(MoveRejection::Blockade);
        }
    }
    Ok(destination)
}

/// Pieces `player` may move with `dice`, in piece order.
///
/// An empty result means the turn is forfeited.
#[must_use]
pub fn legal_moves(state: &GameState, player: PlayerId, dice: u8) -> LegalMoves {
    let Some(owner) = state.player(player) else {
        return LegalMoves::new();
    };
    let board = state.board();
    let rules = &state.config().rules;
    let occupancy = Occupancy::of(state);

    let moves: LegalMoves = owner
        .pieces
        .iter()
        .filter(|piece| {
            target(board, rules, &occupancy, player, owner.color, piece.position, dice).is_ok()
        })
        .map(|piece| piece.id)
        .collect();

    debug!(game = state.id(), %player, dice, moves = ?moves, "legal moves");
    moves
}

/// Landing position of `piece` for `dice`, checking every movement rule.
pub fn destination(
    state: &GameState,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<Position, GameError> {
    let (owner, found) = state.piece(piece).ok_or(GameError::InvalidPiece(piece))?;
    if owner != player {
        return Err(GameError::IllegalMove {
            piece,
            reason: MoveRejection::NotOwned,
        });
    }
    let color = state.players()[owner.index()].color;
    let occupancy = Occupancy::of(state);

    target(state.board(), &state.config().rules, &occupancy, player, color, found.position, dice)
        .map_err(|reason| GameError::IllegalMove { piece, reason })
}

/// Move `piece` by `dice`, resolving captures and safe-lane transitions.
///
/// Only movement is resolved here: the returned snapshot still has the
/// same current player and phase. Fails without touching `state` when the
/// piece is unknown or the move is not legal.
pub fn apply_move(
    state: &GameState,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<MoveOutcome, GameError> {
    let to = destination(state, player, piece, dice)?;

    let mover = &state.players()[player.index()];
    let slot = mover.slot_of(piece).ok_or(GameError::InvalidPiece(piece))?;
    let from = mover.pieces[slot].position;
    let board = state.board();
    let rules = state.config().rules;

    let captured = match to {
        Position::Ring(cell) if !(rules.entry_cells_are_safe && board.is_entry_cell(cell)) => {
            Occupancy::of(state).lone_opponent(cell, player)
        }
        _ => None,
    };

    let mut next = state.clone();
    next.set_position(player, slot, to);

    let mut events = Events::new();
    let kind = match (from, to, captured) {
        (_, Position::Finished, _) => MoveKind::ReachedHome,
        (Position::Ring(_), Position::Lane(_), _) => MoveKind::EnteredSafeLane,
        (_, _, Some((owner, victim))) => {
            if let Some(victim_slot) = state.players()[owner.index()].slot_of(victim) {
                next.set_position(owner, victim_slot, Position::Home);
            }
            events.push(PointAward::capture(mover.user.clone(), rules.capture_points));
            MoveKind::Captured { victim, owner }
        }
        (Position::Home, _, _) => MoveKind::Entered,
        _ => MoveKind::Advanced,
    };

    next.set_message(describe(state, player, piece, to, kind));

    match kind {
        MoveKind::Captured { victim, owner } => {
            info!(
                game = state.id(),
                %player,
                %piece,
                %victim,
                victim_owner = %owner,
                ?to,
                "piece captured"
            );
        }
        _ => debug!(game = state.id(), %player, %piece, ?from, ?to, ?kind, "piece moved"),
    }

    Ok(MoveOutcome {
        state: next,
        kind,
        from,
        to,
        events,
    })
}

fn describe(
    state: &GameState,
    player: PlayerId,
    piece: PieceId,
    to: Position,
    kind: MoveKind,
) -> String {
    let name = &state.players()[player.index()].name;
    match (kind, to) {
        (MoveKind::Entered, _) => format!("{} brought piece {} onto the board.", name, piece),
        (MoveKind::Captured { victim, owner }, _) => {
            let victim_name = &state.players()[owner.index()].name;
            let cell = to.ring_cell().unwrap_or_default();
            format!("{} captured {}'s piece {} on cell {}!", name, victim_name, victim, cell)
        }
        (MoveKind::EnteredSafeLane, _) => {
            format!("{}'s piece {} entered the safe lane.", name, piece)
        }
        (MoveKind::ReachedHome, _) => format!("{}'s piece {} reached home.", name, piece),
        (MoveKind::Advanced, Position::Lane(lane)) => {
            format!("{} moved piece {} to safe lane cell {}.", name, piece, lane + 1)
        }
        (MoveKind::Advanced, _) => {
            let cell = to.ring_cell().unwrap_or_default();
            format!("{} moved piece {} to cell {}.", name, piece, cell)
        }
    }
}
