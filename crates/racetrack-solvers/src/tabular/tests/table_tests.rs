use racetrack_env::{ActionId, Car, Coord, CrashPolicy, EnvConfig, Racetrack, TrackMap, Velocity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{SHORT_CORRIDOR, unit_speed_track};
use crate::tabular::{
    error::SolverError,
    table::{PolicyTable, QTable, StateIndex, StateShape, ValueTable},
};

#[test]
fn shape_uses_inclusive_velocity_widths() {
    let map = TrackMap::parse(SHORT_CORRIDOR).expect("track should parse");
    let track = Racetrack::new(map, &EnvConfig::default()).expect("default config is valid");
    let shape = StateShape::from_racetrack(&track);

    assert_eq!(shape.dims(), [3, 3, 11, 11]);
    assert_eq!(shape.num_actions(), 9);
    assert_eq!(shape.state_count(), 3 * 3 * 11 * 11);
}

#[test]
fn velocity_bins_round_trip_through_index() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);

    let state = shape
        .index_of(Coord::new(1, 0), Velocity::new(-1, 1))
        .expect("state is inside the table");
    assert_eq!(
        state,
        StateIndex {
            x: 1,
            y: 0,
            vx: 0,
            vy: 2
        }
    );
    assert_eq!(shape.position_of(state), Coord::new(1, 0));
    assert_eq!(shape.velocity_of(state), Velocity::new(-1, 1));
}

#[test]
fn out_of_range_states_are_errors() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);

    for (position, velocity) in [
        (Coord::new(-1, 0), Velocity::ZERO),
        (Coord::new(3, 0), Velocity::ZERO),
        (Coord::new(0, 3), Velocity::ZERO),
        (Coord::new(0, 0), Velocity::new(2, 0)),
        (Coord::new(0, 0), Velocity::new(0, -2)),
    ] {
        assert_eq!(
            shape.index_of(position, velocity),
            Err(SolverError::StateOutOfBounds { position, velocity })
        );
    }

    let beyond = StateIndex {
        x: 0,
        y: 0,
        vx: 3,
        vy: 0,
    };
    assert!(matches!(
        shape.offset(beyond),
        Err(SolverError::StateOutOfBounds { .. })
    ));
}

#[test]
fn indices_enumerate_offsets_in_order() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);

    let offsets: Vec<usize> = shape
        .indices()
        .map(|state| shape.offset(state).expect("enumerated state is valid"))
        .collect();

    assert_eq!(offsets.len(), shape.state_count());
    assert!(offsets.iter().copied().eq(0..shape.state_count()));
}

#[test]
fn observe_discretizes_the_car() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);
    let car = Car::new(&track, CrashPolicy::Nearest, Some(1));

    let state = shape.observe(&car).expect("start state is inside the table");
    assert_eq!(
        state,
        StateIndex {
            x: 0,
            y: 0,
            vx: 1,
            vy: 1
        }
    );
}

#[test]
fn q_table_rows_and_action_bounds() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut table = QTable::random(shape, &mut rng);
    let state = shape
        .index_of(Coord::new(1, 0), Velocity::ZERO)
        .expect("state is inside the table");

    assert_eq!(table.row(state).expect("row exists").len(), 9);
    assert!(
        table
            .row(state)
            .expect("row exists")
            .iter()
            .all(|value| (0.0..1.0).contains(value))
    );

    table
        .set(state, ActionId::from(4), -2.5)
        .expect("action is in range");
    assert_eq!(table.get(state, ActionId::from(4)), Ok(-2.5));
    assert_eq!(table.row(state).expect("row exists")[4], -2.5);

    assert_eq!(
        table.get(state, ActionId::from(9)),
        Err(SolverError::ActionOutOfBounds {
            action_id: ActionId::from(9),
            num_actions: 9
        })
    );
}

#[test]
fn value_and_policy_tables_start_empty() {
    let track = unit_speed_track(SHORT_CORRIDOR, 1.0);
    let shape = StateShape::from_racetrack(&track);
    let mut values = ValueTable::zeros(shape);
    let mut policy = PolicyTable::new(shape);
    let state = shape
        .index_of(Coord::new(0, 0), Velocity::ZERO)
        .expect("state is inside the table");

    assert!(values.as_slice().iter().all(|value| *value == 0.0));
    assert_eq!(policy.get(state), Ok(None));

    values.set(state, -1.5).expect("state is valid");
    policy.set(state, ActionId::from(2)).expect("action is valid");
    assert_eq!(values.get(state), Ok(-1.5));
    assert_eq!(policy.get(state), Ok(Some(ActionId::from(2))));
    assert!(policy.set(state, ActionId::from(12)).is_err());
}
