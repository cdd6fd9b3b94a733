use proptest::prelude::*;

use racetrack_env::{
    Action, Car, Cell, Coord, CrashPolicy, EnvConfig, FinishLine, Racetrack, TrackMap, Velocity,
};

const L_TRACK: &str = include_str!("../tracks/l_track.txt");

fn l_track() -> Racetrack {
    let map = TrackMap::parse(L_TRACK).expect("l track should parse");
    Racetrack::new(map, &EnvConfig::default()).expect("default config is valid")
}

fn is_relief(track: &Racetrack, coord: Coord) -> bool {
    track.map().cell(coord).is_some_and(|cell| cell.is_relief())
}

#[test]
fn idle_from_rest_never_crashes_or_finishes() {
    let track = l_track();
    let mut car = Car::new(&track, CrashPolicy::Nearest, Some(0));
    let relief: Vec<Coord> = track.map().relief_cells().collect();

    for cell in relief {
        car.place(cell, Velocity::ZERO);
        car.step(Action::IDLE);

        assert_eq!(car.position(), cell);
        assert_eq!(car.velocity(), Velocity::ZERO);
        assert_eq!(car.previous_position(), Some(cell));
        assert!(!car.is_finished());
    }
}

proptest! {
    #[test]
    fn velocity_stays_within_range(
        seed in any::<u64>(),
        restart in any::<bool>(),
        accelerations in proptest::collection::vec((-1i32..=1, -1i32..=1), 1..64),
    ) {
        let track = l_track();
        let policy = if restart { CrashPolicy::Restart } else { CrashPolicy::Nearest };
        let mut car = Car::new(&track, policy, Some(seed));

        for (ax, ay) in accelerations {
            car.step(Action::new(ax, ay));
            let velocity = car.velocity();
            prop_assert!(track.x_velocity_range().contains(velocity.x));
            prop_assert!(track.y_velocity_range().contains(velocity.y));
            if car.is_finished() {
                car.reset();
            }
        }
    }

    #[test]
    fn nearest_recovery_lands_on_relief_cell(
        cell_idx in 0usize..256,
        vx in -5i32..=5,
        vy in -5i32..=5,
        ax in -1i32..=1,
        ay in -1i32..=1,
    ) {
        let track = l_track();
        let relief: Vec<Coord> = track.map().relief_cells().collect();
        let start = relief[cell_idx % relief.len()];
        let mut car = Car::new(&track, CrashPolicy::Nearest, Some(5));
        car.place(start, Velocity::new(vx, vy));

        car.step(Action::new(ax, ay));

        let raw = Coord::new(start.x + vx + ax, start.y + vy + ay);
        if track.map().is_crash(raw) {
            prop_assert!(is_relief(&track, car.position()));
            prop_assert_eq!(car.velocity(), Velocity::ZERO);
            prop_assert_eq!(car.previous_position(), None);
        } else {
            prop_assert_eq!(car.position(), raw);
            prop_assert_ne!(track.map().cell(raw), Some(Cell::Wall));
        }
    }

    #[test]
    fn restart_recovery_matches_reset(
        vx in -5i32..=5,
        vy in -5i32..=5,
    ) {
        let track = l_track();
        let mut car = Car::new(&track, CrashPolicy::Restart, Some(17));
        // Far outside the grid so every acceleration crashes.
        car.place(Coord::new(-20, -20), Velocity::new(vx, vy));

        car.step(Action::IDLE);

        prop_assert!(track.map().start_cells().contains(&car.position()));
        prop_assert_eq!(car.velocity(), Velocity::ZERO);
        prop_assert!(!car.is_finished());
        prop_assert_eq!(car.previous_position(), None);
    }

    #[test]
    fn finish_crossing_ignores_endpoint_order(
        fixed in -10i32..10,
        a in -10i32..10,
        b in -10i32..10,
        horizontal in any::<bool>(),
        old in (-12i32..12, -12i32..12),
        new in (-12i32..12, -12i32..12),
    ) {
        let (first, second) = if horizontal {
            (Coord::new(fixed, a), Coord::new(fixed, b))
        } else {
            (Coord::new(a, fixed), Coord::new(b, fixed))
        };
        let forward = FinishLine::new(first, second);
        let backward = FinishLine::new(second, first);
        let old = Coord::new(old.0, old.1);
        let new = Coord::new(new.0, new.1);

        prop_assert_eq!(forward.crossed(old, new), backward.crossed(old, new));
    }
}
