use std::f64::consts::FRAC_PI_4;

use flight_hud::core::HudSnapshot;
use flight_hud::term::{
    altitude_text, heading_text, horizon_visible, horizon_y, palette_of, vertical_speed_text,
    DrawCmd, DrawList, HudLayout, HudView, Viewport, READOUT_OVERFLOW,
};
use flight_hud::types::{CollisionStatus, Rgb};

const VP: Viewport = Viewport {
    width: 160,
    height: 100,
};

fn level() -> HudSnapshot {
    HudSnapshot {
        hud_enabled: true,
        ..HudSnapshot::default()
    }
}

fn render(snap: &HudSnapshot) -> DrawList {
    let mut out = DrawList::new();
    HudView::default().render_into(snap, VP, &mut out);
    out
}

/// Horizontal lines drawn at exactly `y` spanning outside the crosshair.
fn horizon_segments(list: &DrawList, y: f32) -> usize {
    list.iter()
        .filter(|c| match c {
            DrawCmd::Line { from, to, .. } => {
                from.y == y && to.y == y && (from.x - to.x).abs() >= 30.0
            }
            _ => false,
        })
        .count()
}

/// Long horizontal lines anywhere (only the horizon qualifies).
fn long_lines(list: &DrawList) -> usize {
    list.iter()
        .filter(|c| match c {
            DrawCmd::Line { from, to, .. } => from.y == to.y && (from.x - to.x).abs() >= 30.0,
            _ => false,
        })
        .count()
}

#[test]
fn level_flight_puts_horizon_on_vertical_center() {
    assert_eq!(horizon_y(0.0, VP.height), 50.0);
    assert_eq!(horizon_segments(&render(&level()), 50.0), 2);
}

#[test]
fn horizon_offset_is_linear_inside_half_fov() {
    let base = horizon_y(0.0, VP.height);
    for i in -9..=9 {
        let pitch = FRAC_PI_4 * i as f64 / 10.0;
        let expected = -(pitch / FRAC_PI_4) * 50.0;
        assert!((horizon_y(pitch, VP.height) - base - expected).abs() < 1e-9);
    }
}

#[test]
fn horizon_is_culled_outside_margin() {
    // Offset of -(50 + 100) puts the line at the -100 margin.
    let edge = FRAC_PI_4 * 3.0;
    assert!((horizon_y(edge, VP.height) + 100.0).abs() < 1e-9);

    let inside = HudSnapshot {
        pitch: edge * 0.99,
        ..level()
    };
    assert!(horizon_visible(horizon_y(inside.pitch, VP.height), VP.height));
    assert_eq!(long_lines(&render(&inside)), 2);

    let beyond = HudSnapshot {
        pitch: edge * 1.01,
        ..level()
    };
    let y = horizon_y(beyond.pitch, VP.height);
    assert!(!horizon_visible(y, VP.height));
    assert_eq!(long_lines(&render(&beyond)), 0);

    let below = HudSnapshot {
        pitch: -edge * 1.01,
        ..level()
    };
    assert!(!horizon_visible(horizon_y(below.pitch, VP.height), VP.height));
    assert_eq!(long_lines(&render(&below)), 0);
}

#[test]
fn heading_always_in_range_and_wraps() {
    let cases = [
        (0.0, "0°"),
        (1.0, "359°"),
        (-90.0, "90°"),
        (-359.6, "0°"),
        (-720.0 - 45.0, "45°"),
        (3600.0 + 10.0, "350°"),
    ];
    for (yaw_deg, want) in cases {
        let snap = HudSnapshot {
            yaw: f64::to_radians(yaw_deg),
            ..level()
        };
        assert!(snap.heading_display() < 360);
        assert_eq!(heading_text(&snap).as_str(), want, "yaw {yaw_deg}");
    }
}

#[test]
fn vertical_speed_is_unclamped_but_indicator_saturates() {
    let view = HudView::default();
    let cy = 50.0;
    let half = view.layout().climb_half_height();

    let mut snap = level();
    snap.velocity[1] = 5.0;
    let list = render(&snap);
    assert!(list.texts().any(|t| t == "V/S: 50.00"));
    assert_eq!(view.climb_indicator_y(&snap, VP), cy - half);

    snap.velocity[1] = 0.5;
    assert_eq!(view.climb_indicator_y(&snap, VP), cy - half);

    snap.velocity[1] = -0.5;
    assert_eq!(view.climb_indicator_y(&snap, VP), cy + half);

    snap.velocity[1] = -40.0;
    assert_eq!(view.climb_indicator_y(&snap, VP), cy + half);
    assert!(render(&snap).texts().any(|t| t == "V/S: -400.00"));

    snap.velocity[1] = 0.25;
    assert_eq!(view.climb_indicator_y(&snap, VP), cy - half / 2.0);
}

#[test]
fn collision_status_determines_palette() {
    let cases = [
        (
            CollisionStatus::Nominal,
            Rgb::new(120, 200, 255),
            Rgb::new(180, 150, 255),
        ),
        (
            CollisionStatus::Approaching,
            Rgb::new(255, 180, 80),
            Rgb::new(255, 220, 100),
        ),
        (
            CollisionStatus::Colliding,
            Rgb::new(255, 80, 100),
            Rgb::new(255, 120, 140),
        ),
    ];
    for (status, base, glow) in cases {
        let snap = HudSnapshot {
            collision: status,
            ..level()
        };
        assert_eq!(palette_of(&render(&snap)), Some((base, glow)));
    }
}

#[test]
fn colliding_is_red_regardless_of_other_state() {
    for (pitch, yaw, vy, transition) in [
        (0.0, 0.0, 0.0, 0.0),
        (2.5, 1.0, -3.0, 0.3),
        (-0.4, 9.0, 0.1, 0.9),
    ] {
        let snap = HudSnapshot {
            pitch,
            yaw,
            velocity: [0.0, vy, 0.0],
            transition,
            collision: CollisionStatus::Colliding,
            ..level()
        };
        assert_eq!(
            palette_of(&render(&snap)),
            Some((Rgb::new(255, 80, 100), Rgb::new(255, 120, 140)))
        );
    }
}

#[test]
fn overlay_alpha_scales_every_paint() {
    let half = HudSnapshot {
        transition: 0.5,
        ..level()
    };
    let full = render(&level());
    let faded = render(&half);
    assert_eq!(full.len(), faded.len());
    for (a, b) in full.iter().zip(faded.iter()) {
        if let (Some(pa), Some(pb)) = (a.paint(), b.paint()) {
            assert!((pa.alpha * 0.5 - pb.alpha).abs() < 1e-6);
        }
    }
}

#[test]
fn visibility_gate_at_threshold() {
    for t in [1.0, 0.999, 0.995] {
        let snap = HudSnapshot {
            transition: t,
            ..level()
        };
        assert!(render(&snap).is_empty(), "transition {t}");
    }
    let snap = HudSnapshot {
        transition: 0.98,
        ..level()
    };
    assert!(!render(&snap).is_empty());
}

#[test]
fn reference_scenario() {
    let list = render(&level());
    let texts: Vec<&str> = list.texts().collect();
    assert!(texts.contains(&"ALT: 1.49"));
    assert!(texts.contains(&"0°"));
    assert!(texts.contains(&"HDG"));
    assert_eq!(horizon_segments(&list, 50.0), 2);
    assert_eq!(
        palette_of(&list),
        Some((Rgb::new(120, 200, 255), Rgb::new(180, 150, 255)))
    );
}

#[test]
fn layout_scale_multiplies_geometry_not_centering() {
    let mut small = DrawList::new();
    let mut big = DrawList::new();
    HudView::new(HudLayout::new(1)).render_into(&level(), VP, &mut small);
    HudView::new(HudLayout::new(3)).render_into(&level(), VP, &mut big);

    let first_line = |l: &DrawList| {
        l.iter()
            .find_map(|c| match c {
                DrawCmd::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap()
    };
    let (a0, a1) = first_line(&small);
    let (b0, b1) = first_line(&big);
    assert_eq!(a0.y, b0.y);
    assert_eq!(80.0 - b0.x, 3.0 * (80.0 - a0.x));
    assert_eq!(80.0 - b1.x, 3.0 * (80.0 - a1.x));
}

#[test]
fn oversized_readouts_show_marker_instead_of_partial_number() {
    let high = HudSnapshot {
        position: [0.0, 1e20, 0.0],
        ..level()
    };
    assert_eq!(altitude_text(&high).as_str(), "ALT: ----");

    let dive = HudSnapshot {
        velocity: [0.0, -3e17, 0.0],
        ..level()
    };
    assert_eq!(vertical_speed_text(&dive).as_str(), "V/S: ----");

    let texts: Vec<String> = render(&dive).texts().map(str::to_string).collect();
    assert!(texts.iter().any(|t| t == "V/S: ----"));
    assert!(READOUT_OVERFLOW.chars().all(|c| c == '-'));
}

#[test]
fn large_readouts_that_fit_are_not_clamped() {
    let fast = HudSnapshot {
        velocity: [0.0, -1234567.891, 0.0],
        ..level()
    };
    assert_eq!(vertical_speed_text(&fast).as_str(), "V/S: -12345678.91");

    let high = HudSnapshot {
        position: [0.0, 98765.0, 0.0],
        ..level()
    };
    assert_eq!(altitude_text(&high).as_str(), "ALT: 98766.49");
}
