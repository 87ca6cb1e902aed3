//! Tournament business logic: ordering, bracket generation, advancement, standings.

mod advancement;
mod double_elimination;
mod generator;
mod ordering;
mod single_elimination;
mod standings;

pub use advancement::{
    complete_match, is_tournament_complete, record_match_score, record_walkover,
};
pub use generator::{generate_bracket, start_tournament, strategy_for, BracketStrategy};
pub use ordering::order_registrations;
pub use standings::recalculate_positions;
