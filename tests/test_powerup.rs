use approx::assert_relative_eq;
use room_shooter::config::PlayerDefaults;
use room_shooter::entities::PlayerStats;
use room_shooter::geometry::Point2D;
use room_shooter::powerup::*;

fn stats() -> PlayerStats {
    PlayerStats::from_defaults(&PlayerDefaults::default())
}

fn applied(kind: PowerUpKind, is_super: bool) -> PlayerStats {
    let mut s = stats();
    PowerUp::new(kind, Point2D::default(), is_super).interact(&mut s);
    s
}

#[test]
fn range_up() {
    let base = stats().range;
    assert_relative_eq!(applied(PowerUpKind::RangeUp, false).range, base + 1.0);
    assert_relative_eq!(applied(PowerUpKind::RangeUp, true).range, base + 2.0);
}

#[test]
fn speed_up() {
    let base = stats().speed;
    assert_relative_eq!(applied(PowerUpKind::SpeedUp, false).speed, base + 1.0);
    assert_relative_eq!(applied(PowerUpKind::SpeedUp, true).speed, base + 2.0);
}

#[test]
fn tears_up() {
    let base = stats().tears;
    assert_eq!(applied(PowerUpKind::TearsUp, false).tears, base + 1);
    assert_eq!(applied(PowerUpKind::TearsUp, true).tears, base + 2);
}

#[test]
fn power_up_touches_only_its_stat() {
    let s = applied(PowerUpKind::TearsUp, true);
    let base = stats();
    assert_eq!(s.hearts, base.hearts);
    assert_relative_eq!(s.speed, base.speed);
    assert_relative_eq!(s.range, base.range);
}

#[test]
fn free_power_up_is_always_affordable() {
    let p = PowerUp::new(PowerUpKind::RangeUp, Point2D::default(), false);
    assert_eq!(p.price, None);
    assert!(p.is_affordable(&stats()));
}

#[test]
fn priced_power_up_needs_coins() {
    let p = PowerUp::new(PowerUpKind::RangeUp, Point2D::default(), false).with_price(3);
    let mut s = stats();
    s.coins = 2;
    assert!(!p.is_affordable(&s));
    s.coins = 3;
    assert!(p.is_affordable(&s));
}
