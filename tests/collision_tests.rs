use pointmass::{Constraint, Obb, Particle, PhysicsError, Plane, Settings, Vec3, World};
use pointmass::Vec as _;

#[test]
fn particle_comes_to_rest_on_ground() {
    let mut world: World<f32> = World::new();
    let ground = world.add_physics_plane(Plane::ground(0.0));
    let p = world.add_particle(Particle::new(Vec3::new(0.0, 5.0, 0.0), 1.0).with_radius(0.25));
    world.add_constraint(Constraint::plane(p, ground));

    for _ in 0..180 {
        world.update(1.0 / 60.0).unwrap();
        assert!(world.particle(p).unwrap().pos.y >= 0.25 - 1e-5);
    }
    let particle = world.particle(p).unwrap();
    assert!((particle.pos.y - 0.25).abs() < 1e-4, "y = {}", particle.pos.y);
}

#[test]
fn bouncy_ground_sends_particle_back_up() {
    let mut world: World<f32> = World::new();
    let ground = world.add_physics_plane(Plane::ground(0.0).with_restitution(0.9));
    let p = world.add_particle(Particle::new(Vec3::new(0.0, 2.0, 0.0), 1.0).with_radius(0.0));
    world.add_constraint(Constraint::plane(p, ground));

    let h = world.settings().time_step;
    let mut rising = false;
    for _ in 0..120 {
        world.update(h).unwrap();
        let v = world.particle(p).unwrap().velocity(h);
        if v.y > 1.0 {
            rising = true;
            break;
        }
    }
    assert!(rising, "particle should bounce");
}

#[test]
fn tilted_plane_pushes_along_its_normal() {
    let settings = Settings::new().with_gravity(Vec3::zero());
    let mut world: World<f64> = World::with_settings(settings).unwrap();
    let normal = Vec3::new(1.0, 1.0, 0.0);
    let plane = world.add_physics_plane(Plane::new(normal, 0.0));
    let p = world.add_particle(Particle::new(Vec3::new(-1.0, 0.0, 0.0), 1.0).with_radius(0.0));
    world.add_constraint(Constraint::plane(p, plane));

    world.update(1.0 / 60.0).unwrap();
    let pos = world.particle(p).unwrap().pos;
    assert!(world.planes()[0].signed_distance(pos).abs() < 1e-9);
    assert!((pos.x - -0.5).abs() < 1e-9 && (pos.y - 0.5).abs() < 1e-9, "pos = {:?}", pos);
}

#[test]
fn particle_is_expelled_from_rotated_box() {
    let settings = Settings::new().with_gravity(Vec3::zero());
    let mut world: World<f32> = World::with_settings(settings).unwrap();
    let obb = Obb::rotated_y(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.5, 1.0), 0.6);
    let id = world.add_physics_obb(obb);
    let p = world.add_particle(Particle::new(Vec3::new(0.1, 0.2, 0.1), 1.0).with_radius(0.1));
    world.add_constraint(Constraint::obb(p, id));

    world.update(1.0 / 60.0).unwrap();
    let local = world.obbs()[0].to_local(world.particle(p).unwrap().pos);
    assert!((local.y - 0.6).abs() < 1e-5, "local = {:?}", local);
}

#[test]
fn particle_rests_on_box_top() {
    let mut world: World<f32> = World::with_settings(Settings::new().with_iterations(2)).unwrap();
    let id = world.add_physics_obb(Obb::axis_aligned(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0)));
    let p = world.add_particle(Particle::new(Vec3::new(0.3, 4.0, -0.2), 1.0).with_radius(0.1));
    assert_eq!(world.collide_all_with_obb(id), Ok(1));

    for _ in 0..180 {
        world.update(1.0 / 60.0).unwrap();
    }
    let pos = world.particle(p).unwrap().pos;
    assert!((pos.y - 2.1).abs() < 1e-3, "y = {}", pos.y);
    assert!((pos.x - 0.3).abs() < 1e-4);
}

#[test]
fn unknown_primitives_are_reported() {
    // Ids minted by another world do not exist here.
    let mut scratch: World<f32> = World::new();
    let plane = scratch.add_physics_plane(Plane::ground(0.0));
    let obb = scratch.add_physics_obb(Obb::axis_aligned(Vec3::zero(), Vec3::splat(1.0)));

    let mut world: World<f32> = World::new();
    assert_eq!(world.collide_all_with_plane(plane), Err(PhysicsError::UnknownPlane(0)));
    assert_eq!(world.collide_all_with_obb(obb), Err(PhysicsError::UnknownObb(0)));

    let p = world.add_particle(Particle::new(Vec3::zero(), 1.0));
    world.add_constraint(Constraint::plane(p, plane));
    assert_eq!(world.update(1.0 / 60.0), Err(PhysicsError::UnknownPlane(0)));

    world.clear_constraints();
    world.add_physics_plane(Plane::ground(-10.0));
    world.add_constraint(Constraint::plane(p, plane));
    assert_eq!(world.update(1.0 / 60.0), Ok(1));
}
