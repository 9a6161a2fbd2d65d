//! RNG module - bag piece generation
//!
//! A bag holds one of each of the seven kinds in shuffled order. Pieces are
//! popped off the end until it is empty, then a fresh bag is shuffled.
//! Shuffling is Fisher-Yates over a small seeded LCG, so a seed always
//! reproduces the same sequence.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point of the multiplier half of the LCG.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Multiply-shift keeps the high bits of the LCG output (the low bits
    /// have short periods) and the rejection zone removes modulo bias.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let threshold = max.wrapping_neg() % max;
        loop {
            let m = u64::from(self.next_u32()) * u64::from(max);
            if (m as u32) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Seven-piece bag generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Remaining kinds; the next piece is the last element.
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceBag {
    /// Create a bag generator; the first bag is shuffled on the first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Replace the contents with a fresh permutation of all seven kinds.
    pub fn shuffle_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Pop the next kind, refilling first if the bag is empty.
    pub fn next_kind(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.shuffle_bag();
        }
    }

    /// Pop the next kind as a piece in spawn position.
    pub fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }

    /// Kinds left in the current bag, next one last.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_hits_every_position() {
        // Each kind should land in each slot at least once over many shuffles.
        let mut rng = SimpleRng::new(7);
        let mut seen = [[false; 7]; 7];
        for _ in 0..500 {
            let mut bag = PieceKind::ALL;
            rng.shuffle(&mut bag);
            for (slot, kind) in bag.iter().enumerate() {
                let k = PieceKind::ALL.iter().position(|p| p == kind).unwrap();
                seen[k][slot] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_bag_starts_empty_and_fills_on_draw() {
        let mut bag = PieceBag::new(1);
        assert!(bag.remaining().is_empty());
        bag.next_kind();
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut bag = PieceBag::new(1);
        let mut drawn: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
        drawn.sort_by_key(|k| PieceKind::ALL.iter().position(|p| p == k));
        assert_eq!(drawn, PieceKind::ALL.to_vec());
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_every_bag_is_a_permutation() {
        let mut bag = PieceBag::new(4242);
        for _ in 0..20 {
            let mut drawn: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
            drawn.sort_by_key(|k| PieceKind::ALL.iter().position(|p| p == k));
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_no_kind_three_times_in_a_row() {
        let mut bag = PieceBag::new(31337);
        let seq: Vec<_> = (0..7 * 50).map(|_| bag.next_kind()).collect();
        assert!(seq.windows(3).all(|w| !(w[0] == w[1] && w[1] == w[2])));
    }

    #[test]
    fn test_next_piece_is_spawned() {
        let mut bag = PieceBag::new(5);
        let piece = bag.next_piece();
        assert_eq!(piece, Piece::spawn(piece.kind));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::new(77);
        let mut b = PieceBag::new(77);
        for _ in 0..30 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
        assert_eq!(a.seed(), 77);
    }
}
