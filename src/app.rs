use color_eyre::Result;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use ratatui_image::picker::Picker;
use std::time::{Duration, Instant};

use crate::assets;
use crate::audio::AudioManager;
use crate::entities::{
    DepthCharge, Diver, Explosion, Fish, Harpoon, MAX_FISH, StatusLine, TankState,
};
use crate::input::{InputAction, InputManager};
use crate::renderer::{RenderView, TankRenderer};

/// Frames between accepted spawn/remove key repeats (~0.15s at 40 FPS).
const KEY_REPEAT_FRAMES: u8 = 6;
/// Per-frame odds (1 in N) that a depth charge drops while fish are present.
const DEPTH_CHARGE_ODDS: u32 = 60;
/// Frame period for the ~40 FPS cap.
const FRAME_PERIOD: Duration = Duration::from_millis(25);

/// The main application which holds the state and logic of the tank.
pub struct App {
    running: bool,
    tank_state: TankState,
    fishes: Vec<Fish>,
    diver: Diver,
    harpoons: Vec<Harpoon>,
    charges: Vec<DepthCharge>,
    explosions: Vec<Explosion>,
    status: StatusLine,
    /// screen dimensions
    screen_width: u16,
    screen_height: u16,
    /// Frames info
    frame_count: u64,
    key_cooldown: u8,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: TankRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new() -> Self {
        // Start with reasonable defaults, will be updated on first render
        let screen_width: u16 = 120;
        let screen_height: u16 = 30;

        // The ocean image only needs a protocol when it actually loaded
        let background = assets::load_background().map(|img| {
            let picker =
                Picker::from_query_stdio().unwrap_or_else(|_| Picker::from_fontsize((8, 16)));
            picker.new_resize_protocol(img)
        });

        let tank_height = screen_height.saturating_sub(TankRenderer::CHROME_ROWS);
        let mut diver = Diver::new(screen_width / 2, 0);
        diver.base_y = tank_height.saturating_sub(diver.get_height());

        let mut status = StatusLine::new();
        status.update(0, MAX_FISH);

        Self {
            running: true,
            tank_state: TankState::Running,
            fishes: Vec::new(),
            diver,
            harpoons: Vec::new(),
            charges: Vec::new(),
            explosions: Vec::new(),
            status,
            screen_width,
            screen_height,
            frame_count: 0,
            key_cooldown: 0,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: TankRenderer::new(background),
            audio_manager: AudioManager::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            // Calculate FPS
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // Update screen dimensions before rendering
            let area = terminal.size()?;
            self.screen_width = area.width;
            self.screen_height = area.height;

            // Render the frame
            terminal.draw(|frame| {
                let view = RenderView {
                    tank_state: self.tank_state,
                    fishes: &self.fishes,
                    diver: &self.diver,
                    harpoons: &self.harpoons,
                    charges: &self.charges,
                    explosions: &self.explosions,
                    status: &self.status,
                    frame_count: self.frame_count,
                    fps: self.fps,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            // Poll input events and get actions
            self.input_manager.poll_events(&self.tank_state)?;
            let actions = self.input_manager.get_actions(&self.tank_state);

            // Process all actions
            self.process_actions(&actions);

            // Update tank state
            if self.tank_state == TankState::Running {
                self.update_tank();
            }

            // Sleep to hold the ~40 FPS frame cap
            std::thread::sleep(FRAME_PERIOD);
        }
        Ok(())
    }

    /// Process input actions and update tank state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        let (tank_width, _) = self.tank_size();

        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Pause => {
                    self.tank_state = TankState::Paused;
                }
                InputAction::Resume => {
                    self.tank_state = TankState::Running;
                }
                InputAction::MoveLeft => {
                    self.diver.move_left(0);
                }
                InputAction::MoveRight => {
                    let max_x = tank_width.saturating_sub(self.diver.get_width());
                    self.diver.move_right(max_x);
                }
                InputAction::FireHarpoon => {
                    if self.diver.can_fire() {
                        let (x, y) = self.diver.spear_position();
                        self.harpoons.push(Harpoon::new(x, y));
                        self.diver.reset_reload();
                        self.audio_manager.play_shot();
                    }
                }
                InputAction::SpawnFish => {
                    if self.key_cooldown == 0 && self.fishes.len() < MAX_FISH {
                        self.fishes.push(Fish::new(tank_width, &mut rand::rng()));
                        self.key_cooldown = KEY_REPEAT_FRAMES;
                    }
                }
                InputAction::RemoveFish => {
                    if self.key_cooldown == 0 && !self.fishes.is_empty() {
                        self.fishes.remove(0);
                        self.key_cooldown = KEY_REPEAT_FRAMES;
                    }
                }
                InputAction::ClearTank => {
                    if self.key_cooldown == 0 && !self.fishes.is_empty() {
                        self.fishes.clear();
                        self.key_cooldown = KEY_REPEAT_FRAMES;
                    }
                }
            }
        }
    }

    /// Update tank logic
    fn update_tank(&mut self) {
        self.frame_count += 1;
        self.key_cooldown = self.key_cooldown.saturating_sub(1);
        self.diver.update_reload();

        let (tank_width, tank_height) = self.tank_size();
        let seabed_y = tank_height.saturating_sub(1);

        // Keep the diver on the seabed through terminal resizes
        self.diver.base_y = tank_height.saturating_sub(self.diver.get_height());
        self.diver.x = self
            .diver
            .x
            .min(tank_width.saturating_sub(self.diver.get_width()));

        let mut rng = rand::rng();

        // Fish swim in the water column above the seabed
        for fish in &mut self.fishes {
            fish.update(tank_width, seabed_y, &mut rng);
        }

        // Now and then the newest fish lets go of a depth charge
        if let Some(fish) = self.fishes.last()
            && rng.random_ratio(1, DEPTH_CHARGE_ODDS)
        {
            let x = fish.x + fish.get_width() / 2;
            self.charges
                .push(DepthCharge::new(x, fish.y + fish.get_height()));
        }

        // Update harpoons
        for harpoon in &mut self.harpoons {
            harpoon.update();
        }
        self.harpoons.retain(|h| !h.is_spent());

        // Update depth charges; a charge reaching the seabed bursts
        for charge in &mut self.charges {
            charge.update();
        }
        let mut burst_positions = Vec::new();
        self.charges.retain(|charge| {
            if charge.has_reached(seabed_y) {
                burst_positions.push((charge.x, charge.y));
                false
            } else {
                true
            }
        });
        for (x, y) in burst_positions {
            let mut explosion = Explosion::new_centered(x, y);
            // Keep the burst sprite fully inside the tank
            explosion.y = explosion
                .y
                .min(tank_height.saturating_sub(explosion.get_height()));
            self.explosions.push(explosion);
            self.audio_manager.play_boom();
        }

        // Update explosions
        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());

        // Check collisions
        self.check_collisions();

        // Refresh the status overlay from the live count
        self.status.update(self.fishes.len(), MAX_FISH);
    }

    fn check_collisions(&mut self) {
        // Harpoons hitting fish
        let mut harpoons_to_remove = Vec::new();
        let mut fishes_to_remove = Vec::new();

        for (h_idx, harpoon) in self.harpoons.iter().enumerate() {
            for (f_idx, fish) in self.fishes.iter().enumerate() {
                // Point-in-box collision against the fish sprite
                if harpoon.x >= fish.x
                    && harpoon.x < fish.x + fish.get_width()
                    && harpoon.y >= fish.y
                    && harpoon.y < fish.y + fish.get_height()
                {
                    harpoons_to_remove.push(h_idx);
                    fishes_to_remove.push(f_idx);

                    let center_x = fish.x + fish.get_width() / 2;
                    let center_y = fish.y + fish.get_height() / 2;
                    self.explosions
                        .push(Explosion::new_centered(center_x, center_y));
                    self.audio_manager.play_boom();
                    break;
                }
            }
        }

        // Remove in reverse order to avoid index issues
        harpoons_to_remove.sort_unstable();
        harpoons_to_remove.reverse();
        harpoons_to_remove.dedup();
        for idx in harpoons_to_remove {
            if idx < self.harpoons.len() {
                self.harpoons.remove(idx);
            }
        }

        fishes_to_remove.sort_unstable();
        fishes_to_remove.reverse();
        fishes_to_remove.dedup();
        for idx in fishes_to_remove {
            if idx < self.fishes.len() {
                self.fishes.remove(idx);
            }
        }
    }

    fn tank_size(&self) -> (u16, u16) {
        (
            self.screen_width,
            self.screen_height
                .saturating_sub(TankRenderer::CHROME_ROWS),
        )
    }
}
