use racetrack_env::{ActionId, Racetrack};
use rand::Rng;

/// Index of the highest value in a Q-row; the first index wins ties.
pub fn greedy(q_row: &[f64]) -> Option<ActionId> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in q_row.iter().copied().enumerate() {
        best = match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((idx, value)),
        };
    }
    best.map(|(idx, _)| ActionId::from(idx))
}

/// Highest value in a Q-row.
pub fn max_value(q_row: &[f64]) -> Option<f64> {
    q_row.iter().copied().reduce(f64::max)
}

/// Uniformly random action with probability `explore_probability`, greedy otherwise.
pub fn epsilon_greedy<R: Rng + ?Sized>(
    q_row: &[f64],
    explore_probability: f64,
    rng: &mut R,
) -> Option<ActionId> {
    if q_row.is_empty() {
        return None;
    }
    if rng.gen_bool(explore_probability) {
        return Some(ActionId::from(rng.gen_range(0..q_row.len())));
    }
    greedy(q_row)
}

/// Behaviour policy for training: forces the idle action with probability
/// `1 - p_transition`, and is epsilon-greedy otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ActionSelector {
    p_transition: f64,
    idle: ActionId,
}

impl ActionSelector {
    pub fn new(p_transition: f64, idle: ActionId) -> Self {
        ActionSelector { p_transition, idle }
    }

    pub fn from_racetrack(track: &Racetrack) -> Self {
        Self::new(track.p_transition(), track.actions().idle())
    }

    pub fn select<R: Rng + ?Sized>(
        &self,
        q_row: &[f64],
        explore_probability: f64,
        rng: &mut R,
    ) -> Option<ActionId> {
        if !rng.gen_bool(self.p_transition) {
            return Some(self.idle);
        }
        epsilon_greedy(q_row, explore_probability, rng)
    }
}
