#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// Per-(color, piece-kind) piece counts of a position.
///
/// Built by the position adapter, consumed by material evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PieceCounts {
    counts: [[u8; 6]; 2],
}

impl PieceCounts {
    pub fn set(&mut self, color: Color, kind: PieceKind, count: u8) {
        self.counts[color.idx()][kind.idx()] = count;
    }

    pub fn get(&self, color: Color, kind: PieceKind) -> u8 {
        self.counts[color.idx()][kind.idx()]
    }

    /// Total number of pieces on the board, kings included.
    pub fn total(&self) -> u32 {
        self.counts
            .iter()
            .flat_map(|side| side.iter())
            .map(|&c| c as u32)
            .sum()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
