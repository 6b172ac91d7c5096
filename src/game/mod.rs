// Iterated prisoner's dilemma: moves, payouts, prompts and round resolution.

pub mod extract;
pub mod moves;
pub mod prompt;
pub mod record;
pub mod resolver;

pub use extract::{extract_move, Extracted};
pub use moves::{Move, PayoffTable};
pub use record::{GameState, RoundRecord};
pub use resolver::{play_game, resolve_round, GameOutcome, Matchup, RoundError, RoundOutcome, Turn};
