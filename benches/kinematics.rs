use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swerve_drive_control::chassis::ModuleLayout;
use swerve_drive_control::config::IdleHeadingPolicy;
use swerve_drive_control::geometry::Vector2;
use swerve_drive_control::kinematics::{drive_translation, scale_largest_down, solve_module};

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        frame_transform,
        module_solver,
        module_solver_with_flip,
        output_normalizer,
        full_cycle,
}

criterion_main!(benches);

pub fn frame_transform(c: &mut Criterion) {
    c.bench_function("kinematics::drive_translation", |b| {
        b.iter(|| drive_translation(black_box(0.3), black_box(0.8), black_box(-15.0)))
    });
}

pub fn module_solver(c: &mut Criterion) {
    let translation = Vector2::from_polar(0.8, 10.0);
    let rotation_direction = Vector2::from_polar(1.0, 135.0);

    c.bench_function("kinematics::solve_module", |b| {
        b.iter(|| {
            solve_module(
                black_box(12.0),
                black_box(&translation),
                black_box(&rotation_direction),
                black_box(0.4),
                IdleHeadingPolicy::AlignToRotationDirection,
            )
        })
    });
}

pub fn module_solver_with_flip(c: &mut Criterion) {
    let translation = Vector2::from_polar(0.8, 170.0);
    let rotation_direction = Vector2::from_polar(1.0, 135.0);

    c.bench_function("kinematics::solve_module [flip]", |b| {
        b.iter(|| {
            solve_module(
                black_box(0.0),
                black_box(&translation),
                black_box(&rotation_direction),
                black_box(0.0),
                IdleHeadingPolicy::AlignToRotationDirection,
            )
        })
    });
}

pub fn output_normalizer(c: &mut Criterion) {
    c.bench_function("kinematics::scale_largest_down", |b| {
        b.iter(|| {
            let mut vectors = [
                Vector2::from_polar(1.4, 28.7),
                Vector2::from_polar(0.7, -28.7),
                Vector2::from_polar(1.4, -14.6),
                Vector2::from_polar(0.7, 14.6),
            ];
            scale_largest_down(black_box(&mut vectors), 1.0);
            vectors
        })
    });
}

pub fn full_cycle(c: &mut Criterion) {
    let layout = ModuleLayout::from_positions(&[(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)])
        .unwrap();

    c.bench_function("kinematics::full cycle", |b| {
        b.iter(|| {
            let translation = drive_translation(black_box(0.3), black_box(0.8), black_box(-15.0));
            let mut commands = [Vector2::zero(); 4];
            for (index, rotation_direction) in layout.rotation_directions().iter().enumerate() {
                commands[index] = solve_module(
                    black_box(10.0 * index as f64),
                    &translation,
                    rotation_direction,
                    black_box(0.4),
                    IdleHeadingPolicy::AlignToRotationDirection,
                );
            }
            scale_largest_down(&mut commands, 1.0);
            commands
        })
    });
}
