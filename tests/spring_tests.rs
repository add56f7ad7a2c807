use tactile::{ConfigError, Spring, Spring2D, SpringSettings, Vec2};

const DT: f32 = 1.0 / 60.0;

fn settings(frequency: f32, half_life: f32) -> SpringSettings<f32> {
    SpringSettings::new(frequency, half_life).unwrap()
}

#[test]
fn drops_in_from_offscreen() {
    let mut spring = Spring::new(-800.0f32, 0.0, settings(1.5, 0.05));
    for _ in 0..120 {
        spring.step(DT);
    }
    assert!(spring.position().abs() < 1.0, "position = {}", spring.position());
}

#[test]
fn converges_for_many_tunings() {
    let tunings = [(1.5, 0.05), (1.5, 0.1), (0.5, 0.805), (4.0, 0.3), (0.1, 0.01), (10.0, 2.0)];
    for &(frequency, half_life) in &tunings {
        let mut spring = Spring::new(0.0f32, 100.0, settings(frequency, half_life));
        let steps = ((half_life * 30.0) / DT) as usize + 60;
        for _ in 0..steps {
            spring.step(DT);
        }
        assert!(
            (spring.position() - 100.0).abs() < 0.01,
            "f = {}, half-life = {}: ended at {}",
            frequency,
            half_life,
            spring.position(),
        );
    }
}

#[test]
fn stays_bounded_for_any_dt() {
    let tunings = [(1.5f64, 0.05f64), (0.5, 0.805), (0.1, 0.01), (8.0, 1.0)];
    let dts = [0.001f64, 0.01, 0.1, 1.0];
    for &(frequency, half_life) in &tunings {
        for &dt in &dts {
            let mut spring = Spring::new(-800.0f64, 0.0, SpringSettings::new(frequency, half_life).unwrap());
            let steps = (5.0 / dt) as usize;
            for _ in 0..steps {
                spring.step(dt);
                assert!(
                    spring.position().abs() <= 2.0 * 800.0,
                    "f = {}, half-life = {}, dt = {}: diverged to {}",
                    frequency,
                    half_life,
                    dt,
                    spring.position(),
                );
                assert!(spring.position().is_finite());
            }
        }
    }
}

#[test]
fn step_size_does_not_change_the_trajectory() {
    let s = SpringSettings::new(0.5f64, 0.805).unwrap();
    let mut fine = Spring::new(180.0f64, 0.0, s);
    let mut coarse = Spring::new(180.0f64, 0.0, s);
    for _ in 0..1000 {
        fine.step(0.001);
    }
    coarse.step(1.0);
    assert!((fine.position() - coarse.position()).abs() < 1e-6);
    assert!((fine.velocity() - coarse.velocity()).abs() < 1e-6);
}

#[test]
fn wrap_takes_the_short_way_round() {
    let s = settings(0.5, 0.805).with_wrap(360.0).unwrap();
    let mut rotation = Spring::new(350.0f32, 10.0, s);
    assert!((rotation.offset_to_target() - 20.0).abs() < 1e-4);

    rotation.step(DT);
    let p = rotation.position();
    assert!(p > 350.0 || p < 10.0, "moved the long way: {}", p);
    let remaining = tactile::math::delta_angle_deg(p, 10.0);
    assert!(remaining > 0.0 && remaining < 20.0, "remaining = {}", remaining);
}

#[test]
fn wrapped_position_stays_in_range_and_settles() {
    let s = settings(0.5, 0.805).with_wrap(360.0).unwrap();
    let mut rotation = Spring::new(350.0f32, 10.0, s);
    for _ in 0..1200 {
        rotation.step(DT);
        let p = rotation.position();
        assert!((0.0..360.0).contains(&p), "position escaped the wrap: {}", p);
    }
    assert!(rotation.is_settled(0.01, 0.01), "ended at {}", rotation.position());
}

#[test]
fn non_positive_dt_is_a_no_op() {
    let mut spring = Spring::new(3.0f32, 10.0, settings(4.0, 0.2));
    spring.step(DT);
    let (p, v) = (spring.position(), spring.velocity());
    spring.step(0.0);
    spring.step(-1.0);
    spring.step(f32::NAN);
    assert_eq!(spring.position(), p);
    assert_eq!(spring.velocity(), v);
}

#[test]
fn tiny_half_life_snaps() {
    let mut spring = Spring::new(0.0f32, 50.0, settings(1.0, 1e-4));
    spring.step(DT);
    assert!((spring.position() - 50.0).abs() < 1e-3);

    for half_life in [1e-30f32, 1e-36, 1e-38] {
        let mut spring = Spring::new(-800.0f32, 0.0, settings(1.5, half_life));
        for _ in 0..2 {
            spring.step(DT);
            assert!(
                spring.position().is_finite() && spring.velocity().is_finite(),
                "half-life {}: position {} velocity {}",
                half_life,
                spring.position(),
                spring.velocity(),
            );
        }
        assert_eq!(spring.position(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
    }
}

#[test]
fn tiny_half_life_with_tiny_dt_stays_finite() {
    let mut spring = Spring::new(-800.0f32, 0.0, settings(1.5, 1e-30));
    spring.step(1e-30);
    assert!(spring.position().is_finite() && spring.velocity().is_finite());
    spring.step(DT);
    assert_eq!(spring.position(), 0.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn rejects_degenerate_settings() {
    assert_eq!(SpringSettings::new(0.0f32, 0.1), Err(ConfigError::InvalidFrequency));
    assert_eq!(SpringSettings::new(-1.0f32, 0.1), Err(ConfigError::InvalidFrequency));
    assert_eq!(SpringSettings::new(1.0f32, 0.0), Err(ConfigError::InvalidHalfLife));
    assert_eq!(SpringSettings::new(1.0f32, f32::INFINITY), Err(ConfigError::InvalidHalfLife));
    assert_eq!(settings(1.0, 0.1).with_wrap(0.0), Err(ConfigError::InvalidWrap));
}

#[test]
fn set_target_mid_simulation() {
    let mut spring = Spring::new(0.0f32, 5.0, settings(1.5, 0.1));
    for _ in 0..30 {
        spring.step(DT);
    }
    spring.set_target(-5.0);
    for _ in 0..300 {
        spring.step(DT);
    }
    assert!((spring.position() + 5.0).abs() < 0.001);
}

#[test]
fn velocity_can_be_driven_externally() {
    let mut spring = Spring::at_rest(0.0f32, settings(1.5, 0.1));
    assert!(spring.is_settled(1e-6, 1e-6));
    spring.set_velocity(100.0);
    assert!(!spring.is_settled(0.01, 0.01));
    spring.step(DT);
    assert!(spring.position() > 0.0);
    spring.snap_to_target();
    assert_eq!(spring.position(), 0.0);
    assert_eq!(spring.velocity(), 0.0);
}

#[test]
fn spring_2d_converges() {
    let mut spring = Spring2D::new(Vec2::new(0.0f32, 0.0), Vec2::new(5.0, 5.0), settings(1.5, 0.1));
    for _ in 0..300 {
        spring.step(DT);
    }
    let v = spring.position();
    assert!((v.x - 5.0).abs() < 0.001);
    assert!((v.y - 5.0).abs() < 0.001);
    assert!(spring.is_settled(0.01, 0.1));
}
