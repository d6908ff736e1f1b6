//! Piece supply
//!
//! The game only depends on [`PieceProvider`]. Two suppliers ship with the
//! crate: a seeded 7-bag ([`BagProvider`]) and a fixed cycle
//! ([`SequenceProvider`]) for scripted games and tests.

use crate::piece::Piece;
use crate::types::PieceType;

/// Source of the pieces to spawn.
///
/// Implementations must never hand out a piece without blocks.
pub trait PieceProvider {
    /// Take the next piece from the sequence.
    fn get_piece(&mut self) -> Piece;

    /// Look at the piece that the next [`get_piece`](Self::get_piece) returns.
    fn next_piece(&self) -> Piece;
}

impl<T: PieceProvider + ?Sized> PieceProvider for Box<T> {
    fn get_piece(&mut self) -> Piece {
        (**self).get_piece()
    }

    fn next_piece(&self) -> Piece {
        (**self).next_piece()
    }
}

/// Seeded 32-bit linear congruential generator driving the bag shuffle.
///
/// Same seed, same piece order.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would stay zero forever.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value below `max`. `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle in place, swapping each slot from the back with an earlier one.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag supply: every run of seven pieces holds each type once.
#[derive(Debug, Clone)]
pub struct BagProvider {
    bag: [PieceType; 7],
    index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl BagProvider {
    pub fn new(seed: u32) -> Self {
        let mut provider = Self {
            bag: PieceType::ALL,
            index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        provider.refill();
        provider
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn refill(&mut self) {
        self.bag = PieceType::ALL;
        self.rng.shuffle(&mut self.bag);
        self.index = 0;
    }

    /// Type of the upcoming piece. The bag is never left empty, so this is exact.
    pub fn peek_type(&self) -> PieceType {
        self.bag[self.index]
    }

    pub fn draw_type(&mut self) -> PieceType {
        let kind = self.bag[self.index];
        self.index += 1;
        if self.index == self.bag.len() {
            self.refill();
        }
        kind
    }
}

impl Default for BagProvider {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceProvider for BagProvider {
    fn get_piece(&mut self) -> Piece {
        Piece::new(self.draw_type())
    }

    fn next_piece(&self) -> Piece {
        Piece::new(self.peek_type())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a piece sequence needs at least one piece")]
pub struct EmptySequence;

/// Hands out a fixed list of pieces, starting over after the last one.
#[derive(Debug, Clone)]
pub struct SequenceProvider {
    pieces: Vec<Piece>,
    index: usize,
}

impl SequenceProvider {
    pub fn new(pieces: Vec<Piece>) -> Result<Self, EmptySequence> {
        if pieces.is_empty() {
            return Err(EmptySequence);
        }
        Ok(Self { pieces, index: 0 })
    }

    /// Cycle through canonical pieces of the given types.
    pub fn of_types(types: &[PieceType]) -> Result<Self, EmptySequence> {
        Self::new(types.iter().map(|&kind| Piece::new(kind)).collect())
    }

    /// The same piece forever.
    pub fn repeat(piece: Piece) -> Self {
        Self {
            pieces: vec![piece],
            index: 0,
        }
    }
}

impl PieceProvider for SequenceProvider {
    fn get_piece(&mut self) -> Piece {
        let piece = self.pieces[self.index].clone();
        self.index = (self.index + 1) % self.pieces.len();
        piece
    }

    fn next_piece(&self) -> Piece {
        self.pieces[self.index].clone()
    }
}
