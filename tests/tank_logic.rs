/// Integration tests for tank logic
///
/// These tests verify interactions between different tank entities
/// and core mechanics like collision detection and spawn/despawn behavior.
use aquarium::{DepthCharge, Diver, Explosion, Fish, Harpoon, MAX_FISH, StatusLine};
use rand::SeedableRng;
use rand::rngs::StdRng;

const TANK_W: u16 = 80;
const TANK_H: u16 = 24;

/// Helper function to check if a point lies inside a box
fn point_in_box(px: u16, py: u16, x: u16, y: u16, w: u16, h: u16) -> bool {
    px >= x && px < x + w && py >= y && py < y + h
}

#[test]
fn test_harpoon_hits_fish() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut fish = Fish::new(TANK_W, &mut rng);
    fish.x = 20;
    fish.y = 10;

    let harpoon = Harpoon::new(23, 10);

    assert!(point_in_box(
        harpoon.x,
        harpoon.y,
        fish.x,
        fish.y,
        fish.get_width(),
        fish.get_height(),
    ));
}

#[test]
fn test_harpoon_misses_distant_fish() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut fish = Fish::new(TANK_W, &mut rng);
    fish.x = 20;
    fish.y = 10;

    let harpoon = Harpoon::new(50, 10);

    assert!(!point_in_box(
        harpoon.x,
        harpoon.y,
        fish.x,
        fish.y,
        fish.get_width(),
        fish.get_height(),
    ));
}

#[test]
fn test_harpoon_reaches_fish_depth() {
    // A harpoon fired from the seabed passes through every row above it
    let mut harpoon = Harpoon::new(40, TANK_H - 1);
    let mut visited = Vec::new();
    while !harpoon.is_spent() {
        visited.push(harpoon.y);
        harpoon.update();
    }
    assert_eq!(visited.first(), Some(&(TANK_H - 1)));
    assert_eq!(harpoon.y, 0);
}

#[test]
fn test_fish_actually_swims() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut fish = Fish::new(TANK_W, &mut rng);
    let start_x = fish.x;

    let mut moved = false;
    for _ in 0..40 {
        fish.update(TANK_W, TANK_H, &mut rng);
        if fish.x != start_x {
            moved = true;
        }
    }
    assert!(moved);
}

#[test]
fn test_tank_population_respects_cap() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut fishes: Vec<Fish> = Vec::new();

    // Mirror the spawn gate: requests past the cap are ignored
    for _ in 0..25 {
        if fishes.len() < MAX_FISH {
            fishes.push(Fish::new(TANK_W, &mut rng));
        }
    }
    assert_eq!(fishes.len(), MAX_FISH);

    // Oldest-first removal empties the tank
    while !fishes.is_empty() {
        fishes.remove(0);
    }
    assert!(fishes.is_empty());
}

#[test]
fn test_charge_bursts_into_explosion_at_seabed() {
    let seabed_y = TANK_H - 1;
    let mut charge = DepthCharge::new(30, 5);

    let mut frames = 0;
    while !charge.has_reached(seabed_y) {
        charge.update();
        frames += 1;
        assert!(frames < 1000, "charge never reached the seabed");
    }
    // Sinking one row every other frame from row 5
    assert_eq!(frames, 2 * (seabed_y - 5) as u32);

    let mut explosion = Explosion::new_centered(charge.x, charge.y);
    let mut updates = 0;
    while !explosion.is_done() {
        explosion.update();
        updates += 1;
    }
    assert_eq!(updates, 12);
}

#[test]
fn test_diver_fires_from_above_midpoint() {
    let mut diver = Diver::new(30, TANK_H - 3);
    assert!(diver.can_fire());

    let (x, y) = diver.spear_position();
    let harpoon = Harpoon::new(x, y);
    assert_eq!(harpoon.x, 30 + diver.get_width() / 2);
    assert!(harpoon.y < diver.y());

    diver.reset_reload();
    assert!(!diver.can_fire());
}

#[test]
fn test_diver_walks_the_tank_floor() {
    let max_x = TANK_W - Diver::new(0, 0).get_width();
    let mut diver = Diver::new(0, TANK_H - 3);

    for _ in 0..200 {
        diver.move_right(max_x);
    }
    assert_eq!(diver.x, max_x);

    for _ in 0..200 {
        diver.move_left(0);
    }
    assert_eq!(diver.x, 0);
}

#[test]
fn test_status_line_tracks_population() {
    let mut status = StatusLine::new();

    status.update(0, MAX_FISH);
    assert!(status.message().contains("Fish: 0 of 10"));

    status.update(7, MAX_FISH);
    assert!(status.message().contains("Fish: 7 of 10"));

    status.update(0, MAX_FISH);
    assert!(status.message().contains("Fish: 0 of 10"));
}

#[test]
fn test_two_fish_update_independently() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut first = Fish::new(TANK_W, &mut rng);
    let mut second = Fish::new(TANK_W, &mut rng);
    first.x = 10;
    second.x = 60;

    for _ in 0..100 {
        first.update(TANK_W, TANK_H, &mut rng);
        second.update(TANK_W, TANK_H, &mut rng);
        assert!(first.x + first.get_width() <= TANK_W);
        assert!(second.x + second.get_width() <= TANK_W);
    }
}
