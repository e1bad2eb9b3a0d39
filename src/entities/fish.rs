use rand::Rng;

/// Hard cap on the number of fish in the tank at once.
pub const MAX_FISH: usize = 10;

/// Fish advance by their velocity every 4th frame.
const SWIM_INTERVAL: u64 = 4;
/// Frames before a fish may re-randomize its speed again (~2s at 40 FPS).
const SPEED_RETHINK_COOLDOWN: u64 = 80;
/// Frames before a fish may randomly turn around again (~10s at 40 FPS).
const TURN_COOLDOWN: u64 = 400;
/// Frames before a fish may shift depth again (~2s at 40 FPS).
const DEPTH_COOLDOWN: u64 = 80;

const SPRITE_RIGHT: &str = "><((('>";
const SPRITE_LEFT: &str = "<')))><";

#[derive(Debug, Clone)]
pub struct Fish {
    pub x: u16,
    pub y: u16,
    /// Signed cells per swim step; magnitude is always in 1..5.
    pub velocity: i16,
    age: u64,
    speed_cooldown: u64,
    turn_cooldown: u64,
    depth_cooldown: u64,
}

impl Fish {
    /// Spawns a fish at the surface. The initial velocity is randomized; a
    /// left-swimming fish enters from the right edge, a right-swimming one
    /// from the left.
    pub fn new(tank_width: u16, rng: &mut impl Rng) -> Self {
        let velocity = random_velocity(rng);
        let x = if velocity < 0 {
            tank_width.saturating_sub(Self::sprite_width())
        } else {
            0
        };

        Self {
            x,
            y: 0,
            velocity,
            age: 0,
            speed_cooldown: SPEED_RETHINK_COOLDOWN,
            turn_cooldown: 0,
            depth_cooldown: 0,
        }
    }

    /// Advances the fish by one frame within a tank of the given size.
    pub fn update(&mut self, tank_width: u16, tank_height: u16, rng: &mut impl Rng) {
        self.age += 1;
        self.speed_cooldown = self.speed_cooldown.saturating_sub(1);
        self.turn_cooldown = self.turn_cooldown.saturating_sub(1);
        self.depth_cooldown = self.depth_cooldown.saturating_sub(1);

        // Occasionally pick a fresh direction and speed.
        if self.speed_cooldown == 0 && rng.random_bool(0.5) {
            self.velocity = random_velocity(rng);
            self.speed_cooldown = SPEED_RETHINK_COOLDOWN;
        }

        let max_x = i32::from(tank_width.saturating_sub(self.get_width()));
        let mut hit_edge = false;
        if self.age.is_multiple_of(SWIM_INTERVAL) {
            let new_x = i32::from(self.x) + i32::from(self.velocity);
            hit_edge = new_x < 0 || new_x > max_x;
            self.x = new_x.clamp(0, max_x.max(0)) as u16;
        }

        // Turn at the glass, or at random once the cooldown allows it. A turn
        // may also shift the fish one body-height up or down.
        if hit_edge || rng.random_bool(0.5) {
            if hit_edge || (rng.random_bool(0.5) && self.turn_cooldown == 0) {
                self.velocity = -self.velocity;
                self.turn_cooldown = TURN_COOLDOWN;

                if rng.random_bool(0.5) && self.depth_cooldown == 0 {
                    self.depth_cooldown = DEPTH_COOLDOWN;
                    let step = self.get_height() + 1;
                    if rng.random_bool(0.5) {
                        self.y = self.y.saturating_add(step);
                    } else {
                        self.y = self.y.saturating_sub(step);
                    }
                }

                self.y = self.y.min(tank_height.saturating_sub(self.get_height()));
            }
        }
    }

    pub fn get_sprite(&self) -> &'static str {
        if self.velocity < 0 {
            SPRITE_LEFT
        } else {
            SPRITE_RIGHT
        }
    }

    pub fn get_width(&self) -> u16 {
        Self::sprite_width()
    }

    pub fn get_height(&self) -> u16 {
        1
    }

    fn sprite_width() -> u16 {
        SPRITE_RIGHT.chars().count() as u16
    }
}

/// A signed velocity with magnitude in 1..5, either direction equally likely.
fn random_velocity(rng: &mut impl Rng) -> i16 {
    let magnitude = rng.random_range(1..5);
    if rng.random_bool(0.5) { magnitude } else { -magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TANK_W: u16 = 80;
    const TANK_H: u16 = 24;

    #[test]
    fn test_fish_spawns_at_facing_edge() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let fish = Fish::new(TANK_W, &mut rng);
            if fish.velocity < 0 {
                assert_eq!(fish.x, TANK_W - fish.get_width());
            } else {
                assert_eq!(fish.x, 0);
            }
            assert_eq!(fish.y, 0);
        }
    }

    #[test]
    fn test_fish_velocity_magnitude_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut fish = Fish::new(TANK_W, &mut rng);
        for _ in 0..2000 {
            fish.update(TANK_W, TANK_H, &mut rng);
            let magnitude = fish.velocity.unsigned_abs();
            assert!((1..5).contains(&magnitude), "magnitude {magnitude}");
        }
    }

    #[test]
    fn test_fish_stays_in_tank() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut fish = Fish::new(TANK_W, &mut rng);
        for _ in 0..5000 {
            fish.update(TANK_W, TANK_H, &mut rng);
            assert!(fish.x + fish.get_width() <= TANK_W);
            assert!(fish.y + fish.get_height() <= TANK_H);
        }
    }

    #[test]
    fn test_fish_turns_at_edge() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut fish = Fish::new(TANK_W, &mut rng);
        fish.x = 0;
        fish.velocity = -3;
        // Block the random rethink/turn paths so only the wall can flip it.
        fish.speed_cooldown = SPEED_RETHINK_COOLDOWN;
        fish.turn_cooldown = TURN_COOLDOWN;
        for _ in 0..SWIM_INTERVAL {
            fish.update(TANK_W, TANK_H, &mut rng);
        }
        assert!(fish.velocity > 0);
        assert_eq!(fish.x, 0);
    }

    #[test]
    fn test_fish_sprite_faces_travel_direction() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut fish = Fish::new(TANK_W, &mut rng);
        fish.velocity = 2;
        assert_eq!(fish.get_sprite(), SPRITE_RIGHT);
        fish.velocity = -2;
        assert_eq!(fish.get_sprite(), SPRITE_LEFT);
    }

    #[test]
    fn test_sprite_variants_same_width() {
        assert_eq!(
            SPRITE_LEFT.chars().count(),
            SPRITE_RIGHT.chars().count(),
        );
    }

    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_fish_never_leaves_tank(
                seed in 0u64..1000,
                frames in 1usize..600,
                tank_w in 20u16..200,
                tank_h in 5u16..60,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut fish = Fish::new(tank_w, &mut rng);
                for _ in 0..frames {
                    fish.update(tank_w, tank_h, &mut rng);
                }
                prop_assert!(fish.x + fish.get_width() <= tank_w);
                prop_assert!(fish.y + fish.get_height() <= tank_h);
            }

            #[test]
            fn test_fish_always_has_nonzero_velocity(
                seed in 0u64..1000,
                frames in 1usize..600,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut fish = Fish::new(80, &mut rng);
                for _ in 0..frames {
                    fish.update(80, 24, &mut rng);
                }
                prop_assert!(fish.velocity != 0);
            }
        }
    }
}
