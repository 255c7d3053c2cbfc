use pointmass::{Constraint, Particle, Plane, Settings, Vec3, World};

fn scene() -> World<f32> {
    let settings = Settings::new().with_iterations(4);
    let mut world = World::with_settings(settings).unwrap();
    let ground = world.add_physics_plane(Plane::ground(0.0).with_restitution(0.3));
    world.add_cube(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.5, 0.0, -0.25), 1.0, 2.0, false).unwrap();
    let hook = world.add_particle(Particle::new(Vec3::new(3.0, 4.0, 0.0), 1.0));
    let bob = world.add_particle(Particle::new(Vec3::new(4.0, 4.0, 0.0), 1.0));
    world.add_constraint(Constraint::spring(hook, bob, 1.0));
    world.add_constraint(Constraint::fixed(hook, Vec3::new(3.0, 4.0, 0.0)));
    world.collide_all_with_plane(ground).unwrap();
    world
}

fn positions(world: &World<f32>) -> Vec<Vec3<f32>> {
    world.particles().iter().map(|(_, p)| p.pos).collect()
}

#[test]
fn split_and_merged_updates_agree() {
    let mut split = scene();
    let mut merged = scene();
    let h = split.settings().time_step;

    for _ in 0..90 {
        assert_eq!(split.update(h).unwrap(), 1);
        assert_eq!(split.update(h).unwrap(), 1);
        assert_eq!(merged.update(h + h).unwrap(), 2);
    }

    assert_eq!(positions(&split), positions(&merged));
    assert_eq!(split.world_time(), merged.world_time());
}

#[test]
fn repeated_runs_are_bitwise_identical() {
    let results: Vec<_> = (0..5)
        .map(|_| {
            let mut world = scene();
            for _ in 0..120 {
                world.update(1.0 / 60.0).unwrap();
            }
            positions(&world)
        })
        .collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a, b);
        }
    }
}
