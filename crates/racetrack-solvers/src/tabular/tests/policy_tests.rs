use racetrack_env::ActionId;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::tabular::policy::{ActionSelector, epsilon_greedy, greedy, max_value};

#[test]
fn greedy_breaks_ties_toward_first_index() {
    assert_eq!(greedy(&[0.5, 0.9, 0.9, 0.1]), Some(ActionId::from(1)));
    assert_eq!(greedy(&[-1.0, -1.0]), Some(ActionId::from(0)));
    assert_eq!(greedy(&[]), None);
    assert_eq!(max_value(&[0.5, 0.9, -3.0]), Some(0.9));
    assert_eq!(max_value(&[]), None);
}

#[test]
fn epsilon_greedy_without_exploration_is_greedy() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let row = [0.1, 0.2, 0.7, 0.3];

    for _ in 0..100 {
        assert_eq!(epsilon_greedy(&row, 0.0, &mut rng), Some(ActionId::from(2)));
    }
}

#[test]
fn full_exploration_reaches_every_action() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let row = [0.0; 9];
    let mut seen = [false; 9];

    for _ in 0..1000 {
        let action = epsilon_greedy(&row, 1.0, &mut rng).expect("row is not empty");
        seen[action.index()] = true;
    }

    assert!(seen.iter().all(|hit| *hit));
}

#[test]
fn selector_forces_idle_when_transition_never_applies() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let selector = ActionSelector::new(0.0, ActionId::from(4));
    let row = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    for _ in 0..100 {
        assert_eq!(selector.select(&row, 1.0, &mut rng), Some(ActionId::from(4)));
    }
}

#[test]
fn selector_follows_policy_when_transition_always_applies() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let selector = ActionSelector::new(1.0, ActionId::from(4));
    let row = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

    for _ in 0..100 {
        assert_eq!(selector.select(&row, 0.0, &mut rng), Some(ActionId::from(2)));
    }
}

#[test]
fn selector_idle_rate_tracks_transition_probability() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let selector = ActionSelector::new(0.8, ActionId::from(4));
    let row = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let samples = 20_000;

    let idle = (0..samples)
        .filter(|_| selector.select(&row, 0.0, &mut rng) == Some(ActionId::from(4)))
        .count();
    let rate = idle as f64 / samples as f64;

    assert!((rate - 0.2).abs() < 0.02, "idle rate was {rate}");
}
