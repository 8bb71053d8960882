use fluidtoy::collision::{disk_disk, rect_disk, rect_rect, resolve};
use fluidtoy::{CollisionConfig, CouplingConfig, Disk, FluidGrid, MovableRect, ObstacleManager};
use glam::Vec2;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn test_overlapping_blocks_are_separated() {
    let mut manager = ObstacleManager::new(64).unwrap();
    let a = manager.add_movable_rect(25.0, 25.0, 10.0, 10.0);
    let b = manager.add_movable_rect(30.0, 25.0, 10.0, 10.0);

    let center = |m: &ObstacleManager, k| m.get(k).unwrap().body().unwrap().position;
    assert_eq!(center(&manager, a), Vec2::new(30.0, 30.0));
    assert_eq!(center(&manager, b), Vec2::new(35.0, 30.0));

    manager.handle_collisions();

    let distance = center(&manager, a).distance(center(&manager, b));
    println!("Centre distance after resolution: {:.4}", distance);
    assert!(distance > 9.9, "blocks still overlap: {}", distance);
    assert!(center(&manager, a).x < 30.0 && center(&manager, b).x > 35.0);
    assert_eq!(center(&manager, a).y, 30.0);
}

#[test]
fn test_head_on_disks_bounce_with_restitution() {
    let mut manager = ObstacleManager::new(64).unwrap();
    let a = manager.add_disk(20.0, 30.0, 5.0);
    let b = manager.add_disk(29.0, 30.0, 5.0);
    manager.get_mut(a).unwrap().set_velocity(10.0, 0.0);

    manager.handle_collisions();

    let va = manager.get(a).unwrap().velocity();
    let vb = manager.get(b).unwrap().velocity();
    assert!(approx(va, Vec2::new(3.5, 0.0)), "va = {:?}", va);
    assert!(approx(vb, Vec2::new(6.5, 0.0)), "vb = {:?}", vb);
    assert!(vb.x - va.x > 0.0, "bodies must separate");
}

#[test]
fn test_separating_bodies_keep_velocity() {
    let mut a = Disk::new(10.0, 10.0, 2.0);
    let mut b = Disk::new(13.0, 10.0, 2.0);
    a.body.velocity = Vec2::new(-1.0, 0.0);
    b.body.velocity = Vec2::new(1.0, 0.0);

    let mtv = disk_disk(&a, &b).unwrap();
    resolve(&mut a.body, &mut b.body, mtv, &CollisionConfig::default());
    assert_eq!(a.body.velocity, Vec2::new(-1.0, 0.0));
    assert_eq!(b.body.velocity, Vec2::new(1.0, 0.0));
    assert!(a.body.position.x < 10.0 && b.body.position.x > 13.0);
}

#[test]
fn test_disk_disk_tests() {
    let a = Disk::new(10.0, 10.0, 2.0);
    assert!(disk_disk(&a, &Disk::new(15.0, 10.0, 2.0)).is_none());

    let mtv = disk_disk(&a, &Disk::new(10.0, 13.0, 2.0)).unwrap();
    assert!(approx(mtv, Vec2::new(0.0, 1.0)));

    // Coincident centres fall back to +x.
    let mtv = disk_disk(&a, &Disk::new(10.0, 10.0, 1.0)).unwrap();
    assert!(approx(mtv, Vec2::new(3.0, 0.0)));
}

#[test]
fn test_rect_rect_tests() {
    let a = MovableRect::new(0.0, 0.0, 4.0, 4.0);
    assert!(rect_rect(&a, &MovableRect::new(5.0, 0.0, 4.0, 4.0)).is_none());

    let mtv = rect_rect(&a, &MovableRect::new(1.0, 3.0, 4.0, 4.0)).unwrap();
    assert!(approx(mtv, Vec2::new(0.0, 1.0)), "mtv = {:?}", mtv);

    let mtv = rect_rect(&MovableRect::new(1.0, 3.0, 4.0, 4.0), &a).unwrap();
    assert!(approx(mtv, Vec2::new(0.0, -1.0)), "mtv = {:?}", mtv);
}

#[test]
fn test_rotated_rect_uses_its_own_axes() {
    let a = MovableRect::centered(Vec2::new(10.0, 10.0), 2.0, 2.0);
    let mut b = MovableRect::centered(Vec2::new(12.3, 10.0), 2.0, 2.0);
    // Axis-aligned the gap is 0.3; turned 45 degrees the corner reaches in.
    assert!(rect_rect(&a, &b).is_none());
    b.body.angle = std::f32::consts::FRAC_PI_4;
    let mtv = rect_rect(&a, &b).unwrap();
    assert!(mtv.x > 0.0);
    assert!(b.contains(11.25, 10.0));
    assert!(!b.contains(11.75, 10.9));
}

#[test]
fn test_rect_disk_tests() {
    let rect = MovableRect::centered(Vec2::new(10.0, 10.0), 4.0, 4.0);

    assert!(rect_disk(&rect, &Disk::new(15.0, 10.0, 2.0)).is_none());

    let mtv = rect_disk(&rect, &Disk::new(13.0, 10.0, 2.0)).unwrap();
    assert!(approx(mtv, Vec2::new(1.0, 0.0)), "mtv = {:?}", mtv);

    // Centre on the edge: push along centre-to-centre.
    let mtv = rect_disk(&rect, &Disk::new(12.0, 10.0, 1.5)).unwrap();
    assert!(approx(mtv, Vec2::new(1.5, 0.0)), "mtv = {:?}", mtv);

    // Centre inside: depth is radius plus distance to the nearest face.
    let mtv = rect_disk(&rect, &Disk::new(11.5, 10.0, 1.0)).unwrap();
    assert!(approx(mtv, Vec2::new(1.5, 0.0)), "mtv = {:?}", mtv);
}

#[test]
fn test_mixed_pair_pushed_apart() {
    let mut manager = ObstacleManager::new(64).unwrap();
    let disk = manager.add_disk(20.0, 20.0, 3.0);
    let rect = manager.add_movable_rect(21.0, 16.0, 8.0, 8.0);
    manager.add_fixed_rect(18, 18, 4, 4);

    manager.handle_collisions();

    let disk_x = manager.get(disk).unwrap().body().unwrap().position.x;
    let rect_x = manager.get(rect).unwrap().body().unwrap().position.x;
    assert!(disk_x < 20.0, "disk pushed left: {}", disk_x);
    assert!(rect_x > 25.0, "block pushed right: {}", rect_x);
}

#[test]
fn test_point_query_finds_topmost_movable() {
    let mut manager = ObstacleManager::new(64).unwrap();
    manager.add_movable_rect(10.0, 10.0, 8.0, 8.0);
    assert_eq!(manager.find_movable_at(13.0, 13.0), Some(0));
    assert_eq!(manager.find_movable_at(100.0, 100.0), None);

    manager.add_fixed_rect(12, 12, 3, 3);
    assert_eq!(manager.find_movable_at(13.0, 13.0), Some(0), "fixed blocks are skipped");

    manager.add_disk(14.0, 14.0, 2.0);
    assert_eq!(manager.find_movable_at(14.0, 14.0), Some(2));
    assert_eq!(manager.find_movable_at(11.0, 11.0), Some(0));
}

#[test]
fn test_light_bodies_follow_the_flow_faster() {
    let mut grid = FluidGrid::new(32).unwrap();
    for j in 1..=32 {
        for i in 1..=32 {
            let idx = grid.ix(i, j);
            grid.u[idx] = 0.5;
        }
    }

    let mut manager = ObstacleManager::new(32).unwrap();
    let light = manager.add_disk(8.0, 16.0, 1.0);
    let heavy = manager.add_disk(24.0, 16.0, 5.0);
    manager.sense(&grid);
    manager.update(0.1);

    let v_light = manager.get(light).unwrap().velocity().x;
    let v_heavy = manager.get(heavy).unwrap().velocity().x;
    println!("light {:.4} heavy {:.4}", v_light, v_heavy);
    assert!((v_light - 0.5).abs() < 1e-5, "blend saturates at 1");
    assert!(v_heavy > 0.0 && v_heavy < v_light);
}

#[test]
fn test_zero_coupling_ignores_flow() {
    let mut grid = FluidGrid::new(16).unwrap();
    grid.u.fill(1.0);
    let coupling = CouplingConfig { rect: 0.0, disk: 0.0 };
    let mut manager =
        ObstacleManager::with_config(16, coupling, CollisionConfig::default()).unwrap();
    let id = manager.add_movable_rect(4.0, 4.0, 4.0, 4.0);
    manager.sense(&grid);
    manager.update(0.1);
    assert_eq!(manager.get(id).unwrap().velocity(), Vec2::ZERO);
}

#[test]
fn test_bodies_clamped_to_the_domain() {
    let grid = FluidGrid::new(32).unwrap();
    let mut manager = ObstacleManager::new(32).unwrap();
    let block = manager.add_movable_rect(3.0, 10.0, 6.0, 4.0);
    let disk = manager.add_disk(16.0, 29.0, 2.0);
    manager.get_mut(block).unwrap().set_velocity(-100.0, 1.0);
    manager.get_mut(disk).unwrap().set_velocity(0.0, 100.0);

    manager.sense(&grid);
    manager.update(0.1);

    let block = manager.get(block).unwrap().body().unwrap();
    assert!(approx(block.position, Vec2::new(4.0, 12.0 + 0.1 * block.velocity.y)));
    assert_eq!(block.velocity.x, 0.0, "velocity into the wall is dropped");
    assert!(block.velocity.y > 0.0, "velocity along the wall survives");

    let disk = manager.get(disk).unwrap().body().unwrap();
    assert!(approx(disk.position, Vec2::new(16.0, 30.0)));
    assert_eq!(disk.velocity.y, 0.0);

    // Turned a quarter, the block's long side runs along y.
    let mut tall = MovableRect::centered(Vec2::new(16.0, 2.0), 6.0, 2.0);
    tall.body.angle = std::f32::consts::FRAC_PI_2;
    let mut manager = ObstacleManager::new(32).unwrap();
    let id = manager.push(fluidtoy::Obstacle::Rect(tall));
    manager.update(0.1);
    let position = manager.get(id).unwrap().body().unwrap().position;
    assert!(approx(position, Vec2::new(16.0, 4.0)), "position = {:?}", position);
}
