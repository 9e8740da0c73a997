//! Square-to-piece board mapping.
//!
//! `Position` is a fixed 64-element array indexed by `Square`, so the "one
//! piece per square" invariant holds by construction. Occupancy bitboards are
//! derived on demand for the attack tables in `crate::attacks`.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; 64],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    #[inline]
    pub const fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn is_empty_square(&self, square: Square) -> bool {
        self.squares[square as usize].is_none()
    }

    /// Place `piece` on `square`, returning whatever was there before.
    #[inline]
    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.squares[square as usize].replace(piece)
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square as usize].take()
    }

    /// Move whatever stands on `from` to `to`, returning the displaced piece.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.take(from) {
            Some(piece) => self.put(to, piece),
            None => self.take(to),
        }
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|p| (sq as Square, p)))
    }

    /// Squares holding exactly `piece`.
    pub fn squares_with(&self, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, p)| *p == piece)
            .map(|(sq, _)| sq)
    }

    pub fn occupancy(&self) -> u64 {
        self.pieces().fold(0u64, |acc, (sq, _)| acc | (1u64 << sq))
    }

    pub fn occupancy_of(&self, color: Color) -> u64 {
        self.pieces()
            .filter(|(_, p)| p.color == color)
            .fold(0u64, |acc, (sq, _)| acc | (1u64 << sq))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.squares_with(Piece::new(color, PieceKind::King)).next()
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_types::*;

    #[test]
    fn relocate_moves_piece_and_reports_capture() {
        let mut position = Position::empty();
        let light_rook = Piece::new(Color::Light, PieceKind::Rook);
        let dark_knight = Piece::new(Color::Dark, PieceKind::Knight);
        position.put(0, light_rook);
        position.put(56, dark_knight);

        let captured = position.relocate(0, 56);

        assert_eq!(captured, Some(dark_knight));
        assert_eq!(position.piece_at(56), Some(light_rook));
        assert!(position.is_empty_square(0));
        assert_eq!(position.occupancy(), 1u64 << 56);
    }

    #[test]
    fn king_square_and_color_occupancy() {
        let mut position = Position::empty();
        position.put(4, Piece::new(Color::Light, PieceKind::King));
        position.put(60, Piece::new(Color::Dark, PieceKind::King));
        position.put(12, Piece::new(Color::Light, PieceKind::Pawn));

        assert_eq!(position.king_square(Color::Light), Some(4));
        assert_eq!(position.king_square(Color::Dark), Some(60));
        assert_eq!(position.occupancy_of(Color::Light), (1u64 << 4) | (1u64 << 12));
    }
}
