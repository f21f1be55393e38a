//! Rock-paper-scissors against a random CPU opponent, one round at a time.

use tracing::debug;

use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Options in the order the opponent draws from
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Rock beats scissors, scissors beat paper, paper beats rock
    pub fn beats(&self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        }
    }
}

/// Result of a round from the player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win => "You win!",
            Outcome::Lose => "You lose",
            Outcome::Draw => "It's a draw",
        }
    }
}

/// Outcome for `player` facing `opponent`
pub fn resolve(player: Choice, opponent: Choice) -> Outcome {
    if player == opponent {
        Outcome::Draw
    } else if player.beats(opponent) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub player_choice: Choice,
    pub opponent_choice: Choice,
    pub outcome: Outcome,
}

/// Rock-paper-scissors engine keeping only the last round
pub struct RpsEngine<R> {
    rng: R,
    last_round: Option<RoundResult>,
}

impl<R: RandomSource> RpsEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            last_round: None,
        }
    }

    /// Play one round against a uniformly drawn opponent choice
    pub fn play(&mut self, choice: Choice) -> RoundResult {
        let opponent_choice = Choice::ALL[self.rng.below(Choice::ALL.len())];
        let round = RoundResult {
            player_choice: choice,
            opponent_choice,
            outcome: resolve(choice, opponent_choice),
        };
        debug!(player = ?choice, opponent = ?opponent_choice, outcome = ?round.outcome, "rps round");
        self.last_round = Some(round);
        round
    }
}

impl<R> RpsEngine<R> {
    /// Last round played, `None` before the first one
    pub fn last_round(&self) -> Option<RoundResult> {
        self.last_round
    }
}
