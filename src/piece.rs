use std::fmt;

use crate::board::{BOARD_SIZE, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Tangerine,
    Amethyst,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Tangerine => Side::Amethyst,
            Side::Amethyst => Side::Tangerine,
        }
    }

    /// Zero-based row holding this side's back rank at set-up.
    pub fn home_row(&self) -> usize {
        match self {
            Side::Tangerine => 0,
            Side::Amethyst => BOARD_SIZE - 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Side::Tangerine => "TANGERINE",
            Side::Amethyst => "AMETHYST",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Chinchilla,
    Wombat,
    Emu,
    Cuttlefish,
}

/// Everything that distinguishes one archetype from another.
#[derive(Debug, Clone, Copy)]
pub struct MoveRule {
    pub symbol: char,
    /// Sliding movers need every square between start and end to be empty.
    pub slides: bool,
    /// Capturing a royal piece ends the game.
    pub royal: bool,
    /// Shape test over absolute (column, row) deltas.
    shape: fn(i32, i32) -> bool,
}

// One step in any direction.
fn chinchilla_shape(dc: i32, dr: i32) -> bool {
    dc.max(dr) == 1
}

// Four squares orthogonally, or one diagonally.
fn wombat_shape(dc: i32, dr: i32) -> bool {
    (dc == 4 && dr == 0) || (dr == 4 && dc == 0) || (dc == 1 && dr == 1)
}

// Up to three squares orthogonally, or one diagonally.
fn emu_shape(dc: i32, dr: i32) -> bool {
    (dc == 0 && (1..=3).contains(&dr))
        || (dr == 0 && (1..=3).contains(&dc))
        || (dc == 1 && dr == 1)
}

// Two squares diagonally, or one orthogonally.
fn cuttlefish_shape(dc: i32, dr: i32) -> bool {
    (dc == 2 && dr == 2) || (dc == 1 && dr == 0) || (dc == 0 && dr == 1)
}

/// Indexed by `Archetype as usize`.
static RULES: [MoveRule; 4] = [
    MoveRule {
        symbol: 'C',
        slides: true,
        royal: false,
        shape: chinchilla_shape,
    },
    MoveRule {
        symbol: 'W',
        slides: false,
        royal: false,
        shape: wombat_shape,
    },
    MoveRule {
        symbol: 'E',
        slides: true,
        royal: false,
        shape: emu_shape,
    },
    MoveRule {
        symbol: 'U',
        slides: false,
        royal: true,
        shape: cuttlefish_shape,
    },
];

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Chinchilla,
        Archetype::Wombat,
        Archetype::Emu,
        Archetype::Cuttlefish,
    ];

    pub fn rule(&self) -> &'static MoveRule {
        &RULES[*self as usize]
    }

    pub fn symbol(&self) -> char {
        self.rule().symbol
    }

    pub fn slides(&self) -> bool {
        self.rule().slides
    }

    pub fn is_royal(&self) -> bool {
        self.rule().royal
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Chinchilla => "Chinchilla",
            Archetype::Wombat => "Wombat",
            Archetype::Emu => "Emu",
            Archetype::Cuttlefish => "Cuttlefish",
        }
    }

    /// Whether `from -> to` matches this archetype's movement pattern.
    /// Board occupancy is not considered.
    pub fn is_legal_shape(&self, from: Square, to: Square) -> bool {
        let (dc, dr) = from.delta(to);
        (self.rule().shape)(dc.abs(), dr.abs())
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub archetype: Archetype,
    pub side: Side,
}

impl Piece {
    pub fn new(archetype: Archetype, side: Side) -> Self {
        Piece { archetype, side }
    }

    pub fn symbol(&self) -> char {
        self.archetype.symbol()
    }

    pub fn is_legal_shape(&self, from: Square, to: Square) -> bool {
        self.archetype.is_legal_shape(from, to)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.archetype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: (usize, usize) = (3, 3);

    /// All (dc, dr) offsets from the center that the archetype accepts.
    fn legal_offsets(archetype: Archetype) -> Vec<(i32, i32)> {
        let from = Square::new(CENTER.0, CENTER.1).unwrap();
        let mut offsets = Vec::new();
        for to in Square::all() {
            if archetype.is_legal_shape(from, to) {
                offsets.push(from.delta(to));
            }
        }
        offsets.sort();
        offsets
    }

    fn sorted(mut offsets: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
        offsets.sort();
        offsets
    }

    #[test]
    fn test_chinchilla_moves_one_step_any_direction() {
        let expected = sorted(vec![
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ]);
        assert_eq!(legal_offsets(Archetype::Chinchilla), expected);
    }

    #[test]
    fn test_wombat_long_jump_or_diagonal_step() {
        // From the center a four-square jump leaves the board, so test from a corner too.
        let expected_center = sorted(vec![(-1, -1), (-1, 1), (1, -1), (1, 1)]);
        assert_eq!(legal_offsets(Archetype::Wombat), expected_center);

        let a1 = Square::new(0, 0).unwrap();
        assert!(Archetype::Wombat.is_legal_shape(a1, Square::new(4, 0).unwrap()));
        assert!(Archetype::Wombat.is_legal_shape(a1, Square::new(0, 4).unwrap()));
        assert!(Archetype::Wombat.is_legal_shape(a1, Square::new(1, 1).unwrap()));
        assert!(!Archetype::Wombat.is_legal_shape(a1, Square::new(3, 0).unwrap()));
        assert!(!Archetype::Wombat.is_legal_shape(a1, Square::new(5, 0).unwrap()));
        assert!(!Archetype::Wombat.is_legal_shape(a1, Square::new(4, 4).unwrap()));
        assert!(!Archetype::Wombat.is_legal_shape(a1, Square::new(0, 1).unwrap()));
    }

    #[test]
    fn test_emu_slides_up_to_three_or_steps_diagonally() {
        let expected = sorted(vec![
            (-3, 0),
            (-2, 0),
            (-1, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (0, -3),
            (0, -2),
            (0, -1),
            (0, 1),
            (0, 2),
            (0, 3),
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
        ]);
        assert_eq!(legal_offsets(Archetype::Emu), expected);
    }

    #[test]
    fn test_emu_cannot_slide_four() {
        let a1 = Square::new(0, 0).unwrap();
        assert!(!Archetype::Emu.is_legal_shape(a1, Square::new(0, 4).unwrap()));
        assert!(!Archetype::Emu.is_legal_shape(a1, Square::new(4, 0).unwrap()));
        assert!(!Archetype::Emu.is_legal_shape(a1, Square::new(2, 2).unwrap()));
    }

    #[test]
    fn test_cuttlefish_diagonal_jump_or_orthogonal_step() {
        let expected = sorted(vec![
            (-2, -2),
            (-2, 2),
            (2, -2),
            (2, 2),
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
        ]);
        assert_eq!(legal_offsets(Archetype::Cuttlefish), expected);
    }

    #[test]
    fn test_no_archetype_accepts_null_move() {
        let d4 = Square::new(3, 3).unwrap();
        for archetype in Archetype::ALL {
            assert!(!archetype.is_legal_shape(d4, d4), "{archetype} accepted a null move");
        }
    }

    #[test]
    fn test_shape_is_symmetric() {
        for archetype in Archetype::ALL {
            for from in Square::all() {
                for to in Square::all() {
                    assert_eq!(
                        archetype.is_legal_shape(from, to),
                        archetype.is_legal_shape(to, from)
                    );
                }
            }
        }
    }

    #[test]
    fn test_piece_symbols() {
        assert_eq!(Archetype::Chinchilla.symbol(), 'C');
        assert_eq!(Archetype::Wombat.symbol(), 'W');
        assert_eq!(Archetype::Emu.symbol(), 'E');
        assert_eq!(Archetype::Cuttlefish.symbol(), 'U');
        assert_eq!(Piece::new(Archetype::Emu, Side::Amethyst).symbol(), 'E');
    }

    #[test]
    fn test_capability_flags() {
        assert!(Archetype::Chinchilla.slides());
        assert!(Archetype::Emu.slides());
        assert!(!Archetype::Wombat.slides());
        assert!(!Archetype::Cuttlefish.slides());

        let royals: Vec<Archetype> = Archetype::ALL
            .into_iter()
            .filter(|a| a.is_royal())
            .collect();
        assert_eq!(royals, vec![Archetype::Cuttlefish]);
    }

    #[test]
    fn test_side_opponent_and_home_rows() {
        assert_eq!(Side::Tangerine.opponent(), Side::Amethyst);
        assert_eq!(Side::Amethyst.opponent(), Side::Tangerine);
        assert_eq!(Side::Tangerine.home_row(), 0);
        assert_eq!(Side::Amethyst.home_row(), 6);
        assert_eq!(Side::Amethyst.to_string(), "AMETHYST");
    }
}
