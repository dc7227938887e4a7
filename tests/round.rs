use pacman_core::game::{HouseRelease, ScatterChaseSchedule};
use pacman_core::ghost::Personality;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_schedule_starts_in_scatter() {
    let mut schedule = ScatterChaseSchedule::new(0);
    assert_that(&schedule.should_scatter()).is_true();

    assert_eq!(schedule.update(6.0, false), None);
    assert_eq!(schedule.update(1.0, false), Some(false));
    assert_eq!(schedule.phase(), 1);

    assert_eq!(schedule.update(20.0, false), Some(true));
    assert_eq!(schedule.phase(), 2);
}

#[test]
fn test_schedule_frozen_while_frightened() {
    let mut schedule = ScatterChaseSchedule::new(0);

    assert_eq!(schedule.update(100.0, true), None);
    assert_eq!(schedule.phase(), 0);
    assert_eq!(schedule.update(7.0, false), Some(false));
}

#[test]
fn test_schedule_long_step_crosses_phases() {
    let mut schedule = ScatterChaseSchedule::new(0);

    assert_eq!(schedule.update(34.0, false), Some(false));
    assert_eq!(schedule.phase(), 3);
}

#[test]
fn test_schedule_ends_in_chase() {
    let mut schedule = ScatterChaseSchedule::new(0);

    schedule.update(84.0, false);
    assert_eq!(schedule.phase(), 7);
    assert_that(&schedule.should_scatter()).is_false();

    assert_eq!(schedule.update(1000.0, false), None);
    assert_that(&schedule.should_scatter()).is_false();
}

#[test]
fn test_schedule_later_levels_scatter_less() {
    let mut schedule = ScatterChaseSchedule::new(4);
    assert_eq!(schedule.update(5.0, false), Some(false));

    let mut schedule = ScatterChaseSchedule::new(2);
    assert_eq!(schedule.update(5.0, false), None);
}

#[test]
fn test_release_order_on_first_level() {
    let mut release = HouseRelease::new(0);
    assert_that(&release.is_in_house(Personality::Chaser)).is_false();
    assert_eq!(release.next_in_line(), Some(Personality::Ambusher));

    assert_eq!(release.update(0.0), Some(Personality::Ambusher));
    assert_eq!(release.next_in_line(), Some(Personality::Fickle));

    for _ in 0..29 {
        release.pellet_eaten();
    }
    assert_eq!(release.update(0.0), None);
    assert_eq!(release.personal_counter(Personality::Fickle), 29);

    release.pellet_eaten();
    assert_eq!(release.update(0.0), Some(Personality::Fickle));
    assert_eq!(release.next_in_line(), Some(Personality::Stalker));
}

#[test]
fn test_idle_timer_forces_release() {
    let mut release = HouseRelease::new(0);
    release.update(0.0);

    assert_eq!(release.update(3.5), None);
    assert_eq!(release.update(0.5), Some(Personality::Fickle));

    // Eating resets the timer
    release.update(3.5);
    release.pellet_eaten();
    assert_eq!(release.update(3.5), None);
}

#[test]
fn test_later_levels_release_immediately() {
    let mut release = HouseRelease::new(2);

    assert_eq!(release.update(0.0), Some(Personality::Ambusher));
    assert_eq!(release.update(0.0), Some(Personality::Fickle));
    assert_eq!(release.update(0.0), Some(Personality::Stalker));
    assert_eq!(release.update(0.0), None);
    assert_eq!(release.next_in_line(), None);
}

#[test]
fn test_global_counter_after_life_lost() {
    let mut release = HouseRelease::new(0);
    release.update(0.0);
    release.life_lost();

    assert_that(&release.is_in_house(Personality::Ambusher)).is_true();
    assert_eq!(release.global_counter(), Some(0));
    assert_eq!(release.update(0.0), None);

    for _ in 0..7 {
        release.pellet_eaten();
    }
    assert_eq!(release.update(0.0), Some(Personality::Ambusher));

    for _ in 0..10 {
        release.pellet_eaten();
    }
    assert_eq!(release.update(0.0), Some(Personality::Fickle));

    // The Stalker never leaves on the global counter; at 32 the counter is dropped
    for _ in 0..15 {
        release.pellet_eaten();
    }
    assert_eq!(release.global_counter(), Some(32));
    assert_eq!(release.update(0.0), None);
    assert_eq!(release.global_counter(), None);
    assert_that(&release.is_in_house(Personality::Stalker)).is_true();
    assert_eq!(release.personal_counter(Personality::Stalker), 0);
}
