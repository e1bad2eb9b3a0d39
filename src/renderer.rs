use crate::entities::{DepthCharge, Diver, Explosion, Fish, Harpoon, StatusLine, TankState};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use ratatui_image::{StatefulImage, protocol::StatefulProtocol};

/// View struct that holds all tank state needed for rendering
pub struct RenderView<'a> {
    pub tank_state: TankState,
    pub fishes: &'a [Fish],
    pub diver: &'a Diver,
    pub harpoons: &'a [Harpoon],
    pub charges: &'a [DepthCharge],
    pub explosions: &'a [Explosion],
    pub status: &'a StatusLine,
    pub frame_count: u64,
    pub fps: u32,
    pub area: Rect,
}

/// Handles all rendering responsibilities for the tank
pub struct TankRenderer {
    /// Ocean image protocol; None renders the procedural water instead
    background: Option<StatefulProtocol>,
}

impl TankRenderer {
    pub fn new(background: Option<StatefulProtocol>) -> Self {
        Self { background }
    }

    /// Rows reserved above (status) and below (controls) the tank itself.
    pub const CHROME_ROWS: u16 = 2;

    /// The tank region of the frame: everything between the status line and
    /// the controls hint.
    pub fn tank_area(area: Rect) -> Rect {
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(Self::CHROME_ROWS),
        }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&mut self, frame: &mut Frame, view: &RenderView) {
        match view.tank_state {
            TankState::Running => self.render_tank(frame, view),
            TankState::Paused => self.render_paused(frame, view),
        }
    }

    /// Renders the live tank screen
    fn render_tank(&mut self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let tank = Self::tank_area(area);
        let seabed_y = tank.height.saturating_sub(1);

        // Ocean background: the real image when it loaded, shimmer otherwise
        if let Some(protocol) = &mut self.background {
            frame.render_stateful_widget(StatefulImage::default(), tank, protocol);
        } else {
            self.render_water(frame, view, tank);
        }

        // Seabed along the tank floor
        if tank.height > 0 {
            let sand_area = Rect {
                x: tank.x,
                y: tank.y + seabed_y,
                width: tank.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new("░".repeat(tank.width as usize))
                    .style(Style::default().fg(Color::Yellow)),
                sand_area,
            );
        }

        // Render fish
        for fish in view.fishes {
            if fish.y < tank.height && fish.x + fish.get_width() <= tank.width {
                let fish_area = Rect {
                    x: tank.x + fish.x,
                    y: tank.y + fish.y,
                    width: fish.get_width(),
                    height: 1,
                };
                frame.render_widget(
                    Paragraph::new(fish.get_sprite()).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    fish_area,
                );
            }
        }

        // Render the diver - batched multi-line rendering
        {
            let sprite_lines = view.diver.get_sprite_lines();
            let diver_width = view.diver.get_width();
            let diver_y = view.diver.y();

            let text: Vec<Line> = sprite_lines
                .iter()
                .map(|line| {
                    Line::from(*line).style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect();

            if diver_y + sprite_lines.len() as u16 <= tank.height
                && view.diver.x + diver_width <= tank.width
            {
                let diver_area = Rect {
                    x: tank.x + view.diver.x,
                    y: tank.y + diver_y,
                    width: diver_width,
                    height: sprite_lines.len() as u16,
                };
                frame.render_widget(Paragraph::new(text), diver_area);
            }
        }

        // Render harpoons and depth charges - direct buffer access
        let buffer = frame.buffer_mut();
        for harpoon in view.harpoons {
            if harpoon.x < tank.width && harpoon.y < tank.height {
                buffer.set_string(
                    tank.x + harpoon.x,
                    tank.y + harpoon.y,
                    harpoon.get_sprite().to_string(),
                    Style::default().fg(Color::Cyan),
                );
            }
        }

        for charge in view.charges {
            if charge.x < tank.width && charge.y < tank.height {
                // Blinking warning color once the seabed is close
                let color = if charge.is_about_to_burst(seabed_y) {
                    Color::Red
                } else {
                    Color::White
                };
                buffer.set_string(
                    tank.x + charge.x,
                    tank.y + charge.y,
                    charge.get_sprite().to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
            }
        }

        // Render explosions - batched multi-line rendering, fading with life
        for explosion in view.explosions {
            let sprite_lines = explosion.get_sprite_lines();
            let color = if explosion.life > 8 {
                Color::Red
            } else if explosion.life > 4 {
                Color::LightRed
            } else {
                Color::Yellow
            };

            let text: Vec<Line> = sprite_lines
                .iter()
                .map(|line| {
                    Line::from(*line).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                })
                .collect();

            if explosion.y + sprite_lines.len() as u16 <= tank.height
                && explosion.x + explosion.get_width() <= tank.width
            {
                let explosion_area = Rect {
                    x: tank.x + explosion.x,
                    y: tank.y + explosion.y,
                    width: explosion.get_width(),
                    height: sprite_lines.len() as u16,
                };
                frame.render_widget(Paragraph::new(text), explosion_area);
            }
        }

        // Status overlay at the top
        let status_line = Line::from(vec![
            Span::styled(view.status.message(), Style::default().fg(Color::DarkGray)),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let status_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(status_line), status_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D or Arrows: Move] [F: Harpoon] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Procedural water shimmer used when no ocean image is available
    fn render_water(&self, frame: &mut Frame, view: &RenderView, tank: Rect) {
        if view.frame_count % 10 < 5 {
            let mut rng = rand::rng();
            let water_text = (0..tank.height)
                .map(|_| {
                    (0..tank.width)
                        .map(|_| if rng.random_bool(0.08) { '~' } else { ' ' })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(water_text).style(Style::default().fg(Color::Blue)),
                tank,
            );
        }
    }

    /// Renders the pause screen with overlay
    fn render_paused(&mut self, frame: &mut Frame, view: &RenderView) {
        // First render the tank screen
        self.render_tank(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }
}
