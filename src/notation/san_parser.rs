//! Standard Algebraic Notation parser.
//!
//! Accepted grammar (anything else is `InvalidNotation`):
//!
//! ```text
//! castling = "O-O" ["-O"] [check]
//! standard = [KQRBN] [a-h] [1-8] ["x"] (a-h)(1-8) ["=" (QRBN)] [check]
//! null     = "--"
//! check    = "+" | "#"
//! ```
//!
//! Disambiguation hints are kept exactly as written. Check and mate markers
//! are informational; nothing downstream relies on them for legality.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::CastlingSide;
use crate::game_state::chess_types::{file_of, rank_of, PieceKind, Square};
use crate::utils::algebraic::{file_char, file_from_byte, rank_char, rank_from_byte, square_to_algebraic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMarker {
    Check,
    Checkmate,
}

impl CheckMarker {
    pub const fn char(self) -> char {
        match self {
            CheckMarker::Check => '+',
            CheckMarker::Checkmate => '#',
        }
    }
}

/// Non-castling SAN move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardMove {
    pub piece: PieceKind,
    pub file_hint: Option<u8>,
    pub rank_hint: Option<u8>,
    pub is_capture: bool,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
    pub marker: Option<CheckMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDescriptor {
    Standard(StandardMove),
    Castle {
        side: CastlingSide,
        marker: Option<CheckMarker>,
    },
    Null,
}

impl MoveDescriptor {
    pub fn marker(&self) -> Option<CheckMarker> {
        match self {
            MoveDescriptor::Standard(mv) => mv.marker,
            MoveDescriptor::Castle { marker, .. } => *marker,
            MoveDescriptor::Null => None,
        }
    }
}

pub fn parse_san(san: &str) -> ChessResult<MoveDescriptor> {
    let mut reader = Reader::new(san.as_bytes());
    let descriptor = reader
        .read_descriptor()
        .ok_or_else(|| ChessErrors::InvalidNotation(san.to_owned()))?;

    if reader.remaining() != 0 {
        return Err(ChessErrors::InvalidNotation(san.to_owned()));
    }

    Ok(descriptor)
}

impl FromStr for MoveDescriptor {
    type Err = ChessErrors;

    fn from_str(san: &str) -> ChessResult<Self> {
        parse_san(san)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    fn bump(&mut self) {
        if !self.bytes.is_empty() {
            self.bytes = &self.bytes[1..];
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.bump();
        Some(byte)
    }

    fn read_file(&mut self) -> Option<u8> {
        let file = file_from_byte(self.peek()?)?;
        self.bump();
        Some(file)
    }

    fn read_rank(&mut self) -> Option<u8> {
        let rank = rank_from_byte(self.peek()?)?;
        self.bump();
        Some(rank)
    }

    fn read_square(&mut self) -> Option<Square> {
        let file = self.read_file()?;
        let rank = self.read_rank()?;
        Some(rank * 8 + file)
    }

    fn read_marker(&mut self) -> Option<CheckMarker> {
        if self.eat(b'+') {
            Some(CheckMarker::Check)
        } else if self.eat(b'#') {
            Some(CheckMarker::Checkmate)
        } else {
            None
        }
    }

    fn read_descriptor(&mut self) -> Option<MoveDescriptor> {
        let piece = match self.peek()? {
            b'N' => PieceKind::Knight,
            b'B' => PieceKind::Bishop,
            b'R' => PieceKind::Rook,
            b'Q' => PieceKind::Queen,
            b'K' => PieceKind::King,
            b'O' => return self.read_castle(),
            b'-' => {
                self.bump();
                return self.eat(b'-').then_some(MoveDescriptor::Null);
            }
            _ => PieceKind::Pawn,
        };
        if piece != PieceKind::Pawn {
            self.bump();
        }

        let file = self.read_file();
        let rank = self.read_rank();

        let (file_hint, rank_hint, is_capture, destination) = if self.eat(b'x') {
            (file, rank, true, self.read_square()?)
        } else if let Some(to_file) = self.read_file() {
            let to_rank = self.read_rank()?;
            (file, rank, false, to_rank * 8 + to_file)
        } else {
            (None, None, false, rank? * 8 + file?)
        };

        let promotion = if self.eat(b'=') {
            match self.next()? {
                b'Q' => Some(PieceKind::Queen),
                b'R' => Some(PieceKind::Rook),
                b'B' => Some(PieceKind::Bishop),
                b'N' => Some(PieceKind::Knight),
                _ => return None,
            }
        } else {
            None
        };

        Some(MoveDescriptor::Standard(StandardMove {
            piece,
            file_hint,
            rank_hint,
            is_capture,
            destination,
            promotion,
            marker: self.read_marker(),
        }))
    }

    fn read_castle(&mut self) -> Option<MoveDescriptor> {
        if !(self.eat(b'O') && self.eat(b'-') && self.eat(b'O')) {
            return None;
        }

        let side = if self.eat(b'-') {
            if !self.eat(b'O') {
                return None;
            }
            CastlingSide::QueenSide
        } else {
            CastlingSide::KingSide
        };

        Some(MoveDescriptor::Castle {
            side,
            marker: self.read_marker(),
        })
    }
}

impl fmt::Display for StandardMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece != PieceKind::Pawn {
            write!(f, "{}", self.piece.letter())?;
        }
        if let Some(file) = self.file_hint {
            write!(f, "{}", file_char(file))?;
        }
        if let Some(rank) = self.rank_hint {
            write!(f, "{}", rank_char(rank))?;
        }
        if self.is_capture {
            f.write_str("x")?;
        }
        f.write_str(&square_to_algebraic(self.destination))?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.letter())?;
        }
        if let Some(marker) = self.marker {
            write!(f, "{}", marker.char())?;
        }
        Ok(())
    }
}

impl fmt::Display for MoveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDescriptor::Standard(mv) => mv.fmt(f),
            MoveDescriptor::Castle { side, marker } => {
                f.write_str(match side {
                    CastlingSide::KingSide => "O-O",
                    CastlingSide::QueenSide => "O-O-O",
                })?;
                if let Some(marker) = marker {
                    write!(f, "{}", marker.char())?;
                }
                Ok(())
            }
            MoveDescriptor::Null => f.write_str("--"),
        }
    }
}

/// Fully qualified SAN for a known move (`Ng1f3`, `e5xd6`, `a7a8=Q`).
///
/// Both hints are always written so the resolver needs no disambiguation.
pub fn fully_qualified_san(
    piece: PieceKind,
    from: Square,
    to: Square,
    is_capture: bool,
    promotion: Option<PieceKind>,
) -> String {
    StandardMove {
        piece,
        file_hint: Some(file_of(from)),
        rank_hint: Some(rank_of(from)),
        is_capture,
        destination: to,
        promotion,
        marker: None,
    }
    .to_string()
}
