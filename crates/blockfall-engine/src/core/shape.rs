use std::str::FromStr;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::ParseShapeError;

use super::matrix::Matrix;

/// Display color of a shape, as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02X}{g:02X}{b:02X}")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum Shape {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<Shape> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        Shape::ALL[rng.random_range(0..Shape::LEN)]
    }
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let shape = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c.to_ascii_uppercase()),
            _ => None,
        };
        shape.ok_or_else(|| ParseShapeError { name: s.to_owned() })
    }
}

impl Shape {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    pub const ALL: [Shape; Self::LEN] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    /// Returns the canonical (spawn) occupancy matrix of this shape.
    #[must_use]
    pub const fn template(self) -> Matrix {
        TEMPLATES[self as usize]
    }

    /// Returns the display color of this shape.
    #[must_use]
    pub const fn color(self) -> Color {
        COLORS[self as usize]
    }

    /// Returns the single character representation of this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::Shape;
    ///
    /// assert_eq!(Shape::I.as_char(), 'I');
    /// assert_eq!(Shape::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Shape::I => 'I',
            Shape::O => 'O',
            Shape::T => 'T',
            Shape::S => 'S',
            Shape::Z => 'Z',
            Shape::J => 'J',
            Shape::L => 'L',
        }
    }

    /// Parses a shape from a single uppercase character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Shape::I),
            'O' => Some(Shape::O),
            'T' => Some(Shape::T),
            'S' => Some(Shape::S),
            'Z' => Some(Shape::Z),
            'J' => Some(Shape::J),
            'L' => Some(Shape::L),
            _ => None,
        }
    }
}

const TEMPLATES: [Matrix; Shape::LEN] = [
    // I-piece
    Matrix::from_bits([[1, 1, 1, 1]]),
    // O-piece
    Matrix::from_bits([[1, 1], [1, 1]]),
    // T-piece
    Matrix::from_bits([[0, 1, 0], [1, 1, 1]]),
    // S-piece
    Matrix::from_bits([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Matrix::from_bits([[1, 1, 0], [0, 1, 1]]),
    // J-piece
    Matrix::from_bits([[1, 0, 0], [1, 1, 1]]),
    // L-piece
    Matrix::from_bits([[0, 0, 1], [1, 1, 1]]),
];

const COLORS: [Color; Shape::LEN] = [
    Color::rgb(0x00, 0xFF, 0xFF),
    Color::rgb(0xFF, 0xD7, 0x00),
    Color::rgb(0x80, 0x00, 0x80),
    Color::rgb(0x00, 0xFF, 0x00),
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0xFF, 0xA5, 0x00),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_templates_have_four_cells() {
        for shape in Shape::ALL {
            assert_eq!(
                shape.template().occupied_cells().count(),
                4,
                "{shape:?} should have four cells"
            );
        }
    }

    #[test]
    fn test_template_dimensions() {
        let dims = |shape: Shape| (shape.template().height(), shape.template().width());
        assert_eq!(dims(Shape::I), (1, 4));
        assert_eq!(dims(Shape::O), (2, 2));
        for shape in [Shape::T, Shape::S, Shape::Z, Shape::J, Shape::L] {
            assert_eq!(dims(shape), (2, 3));
        }
    }

    #[test]
    fn test_four_rotations_restore_every_template() {
        for shape in Shape::ALL {
            let template = shape.template();
            let mut matrix = template;
            for _ in 0..4 {
                matrix = matrix.rotated_cw();
            }
            assert_eq!(matrix, template, "{shape:?}");
        }
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = Shape::O.template();
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_rotation_leaves_template_untouched() {
        let before = Shape::T.template();
        let _ = before.rotated_cw();
        assert_eq!(Shape::T.template(), before);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Shape::I.color().to_string(), "#00FFFF");
        assert_eq!(Shape::O.color().to_string(), "#FFD700");
        assert_eq!(Shape::T.color().to_string(), "#800080");
        assert_eq!(Shape::S.color().to_string(), "#00FF00");
        assert_eq!(Shape::Z.color().to_string(), "#FF0000");
        assert_eq!(Shape::J.color().to_string(), "#0000FF");
        assert_eq!(Shape::L.color().to_string(), "#FFA500");
    }

    #[test]
    fn test_shape_char_conversion() {
        for shape in Shape::ALL {
            assert_eq!(Shape::from_char(shape.as_char()), Some(shape));
        }
        assert_eq!(Shape::from_char('X'), None);
        assert_eq!(Shape::from_char('t'), None);
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("T".parse::<Shape>(), Ok(Shape::T));
        assert_eq!("z".parse::<Shape>(), Ok(Shape::Z));
        assert!("".parse::<Shape>().is_err());
        assert!("TT".parse::<Shape>().is_err());
        assert_eq!(
            "X".parse::<Shape>(),
            Err(ParseShapeError {
                name: "X".to_owned()
            })
        );
    }

    #[test]
    fn test_shape_serialization() {
        assert_eq!(serde_json::to_string(&Shape::S).unwrap(), "\"S\"");
        assert_eq!(serde_json::from_str::<Shape>("\"J\"").unwrap(), Shape::J);
    }

    #[test]
    fn test_random_shapes_cover_all_kinds() {
        let mut rng = Pcg64::seed_from_u64(42);
        let mut seen = [false; Shape::LEN];
        for _ in 0..500 {
            let shape: Shape = rng.random();
            seen[shape as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "all shapes should appear: {seen:?}");
    }
}
