use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flight_hud::core::{FlightState, SnapshotSource};
use flight_hud::term::{
    encode_diff_into, raster, DrawList, HudLayout, HudView, PixelSurface, Viewport,
};
use flight_hud::types::CollisionStatus;

fn cruising_state() -> FlightState {
    let state = FlightState::new();
    state.set_hud_enabled(true);
    state.set_orientation(0.1, -0.5);
    state.set_position([10.0, 42.0, -3.0]);
    state.set_velocity([0.3, 0.2, 0.0]);
    state.set_collision(CollisionStatus::Approaching);
    state
}

fn bench_render_into(c: &mut Criterion) {
    let state = cruising_state();
    let view = HudView::default();
    let mut list = DrawList::new();

    c.bench_function("hud_render_into", |b| {
        b.iter(|| {
            view.render_into(&state.read(), black_box(Viewport::new(160, 100)), &mut list);
        })
    });
}

fn bench_frame_small(c: &mut Criterion) {
    let state = cruising_state();
    let view = HudView::default();
    let mut list = DrawList::new();
    let mut surface = PixelSurface::new(160, 100);

    c.bench_function("hud_frame_160x100", |b| {
        b.iter(|| {
            surface.clear();
            view.render_into(&state.read(), Viewport::new(160, 100), &mut list);
            raster::execute(black_box(&list), &mut surface);
        })
    });
}

fn bench_frame_720p(c: &mut Criterion) {
    let state = cruising_state();
    let view = HudView::new(HudLayout::new(4));
    let mut list = DrawList::new();
    let mut surface = PixelSurface::new(1280, 720);

    c.bench_function("hud_frame_1280x720_scale4", |b| {
        b.iter(|| {
            surface.clear();
            view.render_into(&state.read(), Viewport::new(1280, 720), &mut list);
            raster::execute(black_box(&list), &mut surface);
        })
    });
}

fn bench_encode_diff(c: &mut Criterion) {
    let state = cruising_state();
    let view = HudView::default();
    let mut list = DrawList::new();
    let mut prev = PixelSurface::new(160, 100);
    let mut next = PixelSurface::new(160, 100);
    view.render_into(&state.read(), Viewport::new(160, 100), &mut list);
    raster::execute(&list, &mut prev);
    state.set_orientation(0.12, -0.6);
    view.render_into(&state.read(), Viewport::new(160, 100), &mut list);
    raster::execute(&list, &mut next);
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_diff_160x100", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(black_box(&prev), black_box(&next), &mut out).ok();
        })
    });
}

criterion_group!(
    benches,
    bench_render_into,
    bench_frame_small,
    bench_frame_720p,
    bench_encode_diff
);
criterion_main!(benches);
