use approx::assert_relative_eq;
use room_shooter::entities::MapElement;
use room_shooter::geometry::Point2D;
use room_shooter::strategy::*;
use room_shooter::weapon::Weapon;

const W: f64 = 40.0;
const H: f64 = 10.0;

fn weapon() -> Weapon {
    Weapon::new(1_000, 10.0, None)
}

// ── HitStrategy ───────────────────────────────────────────────────────────────

#[test]
fn melee_strikes_once_per_window() {
    let mut s = HitStrategy::non_shooting(0);
    let mut w = weapon();
    let mut calls = 0;
    let origin = Point2D::new(1.0, 1.0);
    let target = Point2D::new(2.0, 1.0);

    assert_eq!(s.hit(999, origin, target, &mut w, || calls += 1), HitOutcome::Idle);
    assert_eq!(s.hit(1_000, origin, target, &mut w, || calls += 1), HitOutcome::Struck);
    assert_eq!(s.hit(1_500, origin, target, &mut w, || calls += 1), HitOutcome::Idle);
    assert_eq!(s.hit(2_000, origin, target, &mut w, || calls += 1), HitOutcome::Struck);
    assert_eq!(calls, 2);
    assert!(w.shots().is_empty());
}

#[test]
fn shooting_fires_weapon_toward_target() {
    let mut s = HitStrategy::shooting();
    let mut w = weapon();
    let mut calls = 0;
    let origin = Point2D::new(0.0, 0.0);
    let target = Point2D::new(5.0, 0.0);

    assert_eq!(s.hit(0, origin, target, &mut w, || calls += 1), HitOutcome::Fired);
    assert_eq!(s.hit(500, origin, target, &mut w, || calls += 1), HitOutcome::Idle);
    assert_eq!(s.hit(1_000, origin, target, &mut w, || calls += 1), HitOutcome::Fired);
    assert_eq!(calls, 0);
    assert_eq!(w.shots().len(), 2);
    assert_relative_eq!(w.shots()[0].direction().dx, 1.0);
}

#[test]
fn strategy_flavours() {
    assert!(HitStrategy::shooting().is_shooting());
    assert!(!HitStrategy::non_shooting(0).is_shooting());
    assert!(MovementStrategy::shooting().is_shooting());
    assert!(!MovementStrategy::non_shooting().is_shooting());
}

// ── MovementStrategy ──────────────────────────────────────────────────────────

#[test]
fn chaser_steps_toward_player() {
    let mut e = MapElement::round(1.0, Point2D::new(10.0, 5.0));
    let target = Point2D::new(20.0, 5.0);
    assert!(MovementStrategy::non_shooting().step(&mut e, target, 10.0, 100, W, H));
    assert_relative_eq!(e.coord().x, 11.0);
    assert_relative_eq!(e.coord().y, 5.0);
}

#[test]
fn chaser_does_not_overshoot() {
    let mut e = MapElement::round(1.0, Point2D::new(10.0, 5.0));
    MovementStrategy::non_shooting().step(&mut e, Point2D::new(10.5, 5.0), 10.0, 100, W, H);
    assert_relative_eq!(e.coord().x, 10.5);
}

#[test]
fn shooter_keeps_its_distance() {
    let mover = MovementStrategy::shooting();

    let mut too_close = MapElement::round(1.0, Point2D::new(10.0, 5.0));
    assert!(mover.step(&mut too_close, Point2D::new(12.0, 5.0), 10.0, 100, W, H));
    assert_relative_eq!(too_close.coord().x, 9.0);

    let mut too_far = MapElement::round(1.0, Point2D::new(10.0, 5.0));
    assert!(mover.step(&mut too_far, Point2D::new(30.0, 5.0), 10.0, 100, W, H));
    assert_relative_eq!(too_far.coord().x, 11.0);

    let mut in_band = MapElement::round(1.0, Point2D::new(10.0, 5.0));
    assert!(!mover.step(&mut in_band, Point2D::new(18.0, 5.0), 10.0, 100, W, H));
    assert_relative_eq!(in_band.coord().x, 10.0);
}

#[test]
fn step_into_wall_is_rejected() {
    let mut e = MapElement::round(1.0, Point2D::new(1.0, 5.0));
    let target = Point2D::new(0.0, 5.0);
    assert!(!MovementStrategy::non_shooting().step(&mut e, target, 10.0, 100, W, H));
    assert_eq!(e.coord(), Point2D::new(1.0, 5.0));
}
