//! Crate root module declarations for the chess replay core.
//!
//! Two rule paths share one set of attack primitives: SAN replay
//! (`notation`, `replay`) rebuilds positions from recorded games, and the
//! coordinate validator (`validation`) judges interactively proposed moves.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod position;
}

pub mod attacks {
    pub mod attack_detection;
    pub mod leaper_tables;
    pub mod slider_rays;
}

pub mod notation {
    pub mod coordinate_move;
    pub mod move_applier;
    pub mod san_parser;
    pub mod source_resolver;
}

pub mod validation {
    #[cfg(test)]
    pub mod fixtures;
    pub mod legality;
    pub mod termination;
}

pub mod replay {
    pub mod game_replay;
    pub mod replay_config;
    pub mod replay_history;
}

pub mod utils {
    pub mod agreement_harness;
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod movetext;
    pub mod render_game_state;
}
