//! Occupancy-aware ray casting for bishops, rooks and queens.
//!
//! A ray includes the first occupied square it meets (a potential capture)
//! and stops there.

use crate::game_state::chess_types::{file_of, rank_of, square_at, Square};

const DIAGONAL_STEPS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const ORTHOGONAL_STEPS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    DIAGONAL_STEPS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ORTHOGONAL_STEPS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

fn trace_ray(square: Square, file_step: i8, rank_step: i8, occupancy: u64) -> u64 {
    let mut file = file_of(square) as i8 + file_step;
    let mut rank = rank_of(square) as i8 + rank_step;
    let mut attacks = 0u64;

    while let Some(target) = square_at(file, rank) {
        let bit = 1u64 << target;
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; zero otherwise (including adjacent squares).
pub fn squares_between(a: Square, b: Square) -> u64 {
    let df = file_of(b) as i8 - file_of(a) as i8;
    let dr = rank_of(b) as i8 - rank_of(a) as i8;

    let aligned = (df == 0) != (dr == 0) || (df != 0 && df.abs() == dr.abs());
    if !aligned {
        return 0;
    }

    let step_f = df.signum();
    let step_r = dr.signum();
    let mut file = file_of(a) as i8 + step_f;
    let mut rank = rank_of(a) as i8 + step_r;
    let mut between = 0u64;

    while let Some(sq) = square_at(file, rank) {
        if sq == b {
            break;
        }
        between |= 1u64 << sq;
        file += step_f;
        rank += step_r;
    }

    between
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, queen_attacks, rook_attacks, squares_between};

    #[test]
    fn open_board_ray_counts_from_d4() {
        let d4 = 27u8;
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
        assert_eq!(bishop_attacks(d4, 0).count_ones(), 13);
        assert_eq!(queen_attacks(d4, 0).count_ones(), 27);
    }

    #[test]
    fn blocker_is_included_and_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);
        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);

        let c1 = 2u8;
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(c1, blocker_on_e3);
        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
    }

    #[test]
    fn between_masks() {
        // a1..e1 -> b1 c1 d1
        assert_eq!(squares_between(0, 4), (1u64 << 1) | (1u64 << 2) | (1u64 << 3));
        // a1..d4 diagonal -> b2 c3
        assert_eq!(squares_between(0, 27), (1u64 << 9) | (1u64 << 18));
        // adjacent and unaligned squares
        assert_eq!(squares_between(0, 1), 0);
        assert_eq!(squares_between(0, 17), 0);
        assert_eq!(squares_between(5, 5), 0);
    }
}
