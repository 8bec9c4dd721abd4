use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

use crate::{ActivePiece, Shape};

/// Supplies the shape of each newly spawned piece.
pub trait PieceSource {
    /// Returns the shape of the next piece.
    fn next_shape(&mut self) -> Shape;

    /// Spawns the next piece at its spawn position.
    fn spawn(&mut self) -> ActivePiece {
        ActivePiece::new(self.next_shape())
    }
}

impl<S> PieceSource for &mut S
where
    S: PieceSource + ?Sized,
{
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

impl<S> PieceSource for Box<S>
where
    S: PieceSource + ?Sized,
{
    fn next_shape(&mut self) -> Shape {
        (**self).next_shape()
    }
}

/// Picks every shape uniformly at random, independently of previous picks.
///
/// There is no bag: the same shape may come up any number of times in a row.
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: Pcg64,
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieces {
    /// Creates a new [`RandomPieces`].
    ///
    /// The random seed is initialized from the OS's random data source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Pcg64::from_os_rng(),
        }
    }

    /// Creates a [`RandomPieces`] that always yields the same sequence for the
    /// same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomPieces {
    fn next_shape(&mut self) -> Shape {
        self.rng.random()
    }
}

/// Yields a fixed sequence of shapes, starting over when it runs out.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSource, ScriptedPieces, Shape};
///
/// let mut pieces = ScriptedPieces::new([Shape::O, Shape::I]);
/// assert_eq!(pieces.next_shape(), Shape::O);
/// assert_eq!(pieces.next_shape(), Shape::I);
/// assert_eq!(pieces.next_shape(), Shape::O);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    shapes: Vec<Shape>,
    next: usize,
}

impl ScriptedPieces {
    /// Creates a source cycling through `shapes`.
    ///
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new<I>(shapes: I) -> Self
    where
        I: IntoIterator<Item = Shape>,
    {
        let shapes: Vec<Shape> = shapes.into_iter().collect();
        assert!(!shapes.is_empty(), "scripted piece sequence must not be empty");
        Self { shapes, next: 0 }
    }
}

impl PieceSource for ScriptedPieces {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_sources_are_deterministic() {
        let mut a = RandomPieces::seeded(7);
        let mut b = RandomPieces::seeded(7);
        let a: Vec<Shape> = (0..50).map(|_| a.next_shape()).collect();
        let b: Vec<Shape> = (0..50).map(|_| b.next_shape()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_pieces_have_no_bag() {
        // A 7-bag never repeats a shape within its first seven draws and never
        // deals the same shape twice in a row inside a bag.
        let mut repeat_in_first_seven = false;
        let mut back_to_back = false;
        for seed in 0..100 {
            let mut source = RandomPieces::seeded(seed);
            let draws: Vec<Shape> = (0..Shape::LEN).map(|_| source.next_shape()).collect();
            let mut seen = [false; Shape::LEN];
            repeat_in_first_seven |= draws
                .iter()
                .any(|&s| std::mem::replace(&mut seen[s as usize], true));
            back_to_back |= draws.windows(2).any(|pair| pair[0] == pair[1]);
        }
        assert!(repeat_in_first_seven);
        assert!(back_to_back);
    }

    #[test]
    fn test_scripted_pieces_cycle() {
        let mut source = ScriptedPieces::new([Shape::T, Shape::S, Shape::Z]);
        let draws: Vec<Shape> = (0..7).map(|_| source.next_shape()).collect();
        assert_eq!(
            draws,
            vec![
                Shape::T,
                Shape::S,
                Shape::Z,
                Shape::T,
                Shape::S,
                Shape::Z,
                Shape::T
            ]
        );
    }

    #[test]
    fn test_spawn_uses_next_shape() {
        let mut source = ScriptedPieces::new([Shape::J]);
        assert_eq!(source.spawn(), ActivePiece::new(Shape::J));
    }

    #[test]
    fn test_source_through_references() {
        fn draw<S: PieceSource>(mut source: S) -> Shape {
            source.next_shape()
        }

        let mut source = ScriptedPieces::new([Shape::L, Shape::O]);
        let boxed: Box<dyn PieceSource> = Box::new(source.clone());
        assert_eq!(draw(boxed), Shape::L);
        assert_eq!(draw(&mut source), Shape::L);
        assert_eq!(source.next_shape(), Shape::O);
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_scripted_pieces_reject_empty() {
        let _ = ScriptedPieces::new([]);
    }
}
