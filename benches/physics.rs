//! Benchmarks for pointmass simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use pointmass::*;

fn bench_free_particles(c: &mut Criterion) {
    c.bench_function("free_particles_1000_60_steps", |b| {
        b.iter(|| {
            let mut world: World<f32> = World::new();
            for i in 0..1000 {
                world.add_particle(Particle::new(Vec3::new(i as f32, 10.0, 0.0), 1.0));
            }
            for _ in 0..60 {
                world.update(1.0 / 60.0).unwrap();
            }
            world.world_time()
        });
    });
}

fn bench_cube_stack(c: &mut Criterion) {
    c.bench_function("cubes_25_on_ground_60_steps", |b| {
        b.iter(|| {
            let settings = Settings::new().with_iterations(4);
            let mut world: World<f32> = World::with_settings(settings).unwrap();
            let ground = world.add_physics_plane(Plane::ground(0.0));
            for i in 0..25 {
                let x = (i % 5) as f32 * 2.0;
                let z = (i / 5) as f32 * 2.0;
                world
                    .add_cube(Vec3::new(x, 2.0, z), Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0, false)
                    .unwrap();
            }
            world.collide_all_with_plane(ground).unwrap();
            for _ in 0..60 {
                world.update(1.0 / 60.0).unwrap();
            }
            world.particle_count()
        });
    });
}

fn bench_catch_up(c: &mut Criterion) {
    c.bench_function("cube_one_second_stall", |b| {
        b.iter(|| {
            let mut world: World<f32> = World::new();
            world
                .add_cube(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.0, 0.0), 1.0, 1.0, true)
                .unwrap();
            world.update(1.0).unwrap()
        });
    });
}

criterion_group!(benches, bench_free_particles, bench_cube_stack, bench_catch_up);
criterion_main!(benches);
