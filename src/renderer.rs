use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::assets::{Assets, CellRect, Sprite};
use crate::entities::{Enemy, GameState, Player, Projectile};
use crate::highscores::{HighScores, InitialsPrompt};

const OCEAN: Color = Color::Rgb(30, 144, 255);
const CANNONBALL: Color = Color::Black;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub score: u32,
    pub health: u8,
    pub field_width: f32,
    pub field_height: f32,
    /// Table shown on the game-over screen
    pub high_scores: &'a HighScores,
    /// Open while the player is signing a new high score
    pub initials: Option<&'a InitialsPrompt>,
    pub area: Rect,
}

/// Maps playfield units onto terminal cells
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    area: Rect,
    field_width: f32,
    field_height: f32,
}

impl Viewport {
    pub fn new(area: Rect, field_width: f32, field_height: f32) -> Self {
        Self {
            area,
            field_width,
            field_height,
        }
    }

    fn column(&self, x: f32) -> i32 {
        self.area.x as i32 + (x / self.field_width * self.area.width as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.area.y as i32 + (y / self.field_height * self.area.height as f32).floor() as i32
    }

    /// Cells covered by a box; never thinner than one cell
    pub fn project(&self, x: f32, y: f32, width: f32, height: f32) -> CellRect {
        let left = self.column(x);
        let top = self.row(y);
        let right = self.column(x + width).max(left + 1);
        let bottom = self.row(y + height).max(top + 1);
        CellRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// The cell holding a point, if it is on screen
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let column = self.column(x);
        let row = self.row(y);
        let inside = column >= self.area.x as i32
            && column < self.area.right() as i32
            && row >= self.area.y as i32
            && row < self.area.bottom() as i32;
        inside.then_some((column as u16, row as u16))
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    assets: Assets,
}

impl GameRenderer {
    pub fn new(assets: Assets) -> Self {
        Self { assets }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Launch => self.render_launch(frame, view),
            GameState::Playing => self.render_game(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_launch(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        match &self.assets.launch {
            Some(splash) => {
                let dest = CellRect {
                    x: area.x as i32,
                    y: area.y as i32,
                    width: area.width as i32,
                    height: area.height as i32,
                };
                splash.draw(frame.buffer_mut(), dest, area, Color::Black);
            }
            None => {
                let title = vec![
                    Line::from(""),
                    Line::from("~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~").centered().blue(),
                    Line::from("B A N S H E E").centered().white().bold(),
                    Line::from("~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~").centered().blue(),
                    Line::from(""),
                    Line::from("Ten hits and she breaks. Sink what you can.")
                        .centered()
                        .gray(),
                ];
                let title_area = Rect {
                    y: area.y + area.height / 3,
                    height: area.height.saturating_sub(area.height / 3),
                    ..area
                };
                frame.render_widget(Paragraph::new(title), title_area);
            }
        }

        let hint = Line::from(vec![Span::styled(
            "[Enter: Start] [Q: Quit]",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(Paragraph::new(hint).centered(), bottom_line(area));
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let viewport = Viewport::new(area, view.field_width, view.field_height);

        frame.render_widget(Block::default().style(Style::default().bg(OCEAN)), area);

        let buffer = frame.buffer_mut();

        let player = view.player;
        let dest = viewport.project(player.x, player.y, player.width, player.height);
        draw_ship(buffer, self.assets.player.as_ref(), dest, area, Color::Green);

        for projectile in view.projectiles {
            if let Some((x, y)) = viewport.cell(projectile.x, projectile.y)
                && let Some(cell) = buffer.cell_mut((x, y))
            {
                cell.set_char('●').set_fg(CANNONBALL).set_bg(OCEAN);
            }
        }

        for enemy in view.enemies {
            let dest = viewport.project(enemy.x, enemy.y, enemy.width, enemy.height);
            draw_ship(buffer, self.assets.enemy.as_ref(), dest, area, Color::Red);
        }

        // Stats overlay at the top
        let hud = vec![
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{}", view.score),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Health: ", Style::default().fg(Color::White)),
                Span::styled(
                    format!("{}", view.health),
                    if view.health > 5 {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD)
                    } else if view.health > 2 {
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                    },
                ),
            ]),
        ];

        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(2),
        };
        frame.render_widget(Paragraph::new(hud), hud_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::White),
        )]);
        frame.render_widget(Paragraph::new(controls).centered(), bottom_line(area));
    }

    /// Renders the high-score table, with the initials prompt on top while it
    /// is open
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let mut lines = vec![
            Line::from(""),
            Line::from("=== GAME OVER ===").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("HIGH SCORES").centered().cyan().bold(),
            Line::from(""),
        ];
        lines.extend(
            view.high_scores
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, entry)| {
                    Line::from(format!(
                        "{:>2}. {:<3}   {:>7}",
                        idx + 1,
                        entry.display_initials(),
                        entry.score
                    ))
                    .centered()
                    .white()
                }),
        );
        lines.push(Line::from(""));
        if view.initials.is_none() {
            lines.push(Line::from("Press R to restart").centered().white());
            lines.push(Line::from("Press Q to quit").centered().white());
        }

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );

        if let Some(prompt) = view.initials {
            render_initials_prompt(frame, area, prompt);
        }
    }
}

fn render_initials_prompt(frame: &mut Frame, area: Rect, prompt: &InitialsPrompt) {
    let typed = format!("{:_<3}", prompt.text());
    let text = vec![
        Line::from(""),
        Line::from("You made the Top Ten!").centered().bold().yellow(),
        Line::from("Enter your initials (3 chars):").centered().white(),
        Line::from(""),
        Line::from(typed).centered().bold().white(),
        Line::from(""),
        Line::from("[Enter: Save] [Backspace: Erase]").centered().gray(),
    ];

    let width = area.width.min(40);
    let height = area.height.min(9);
    let prompt_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, prompt_area);
    frame.render_widget(
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .alignment(Alignment::Center),
        prompt_area,
    );
}

/// Draws a ship picture, or a solid hull of `fallback` when the picture is
/// missing
fn draw_ship(buf: &mut Buffer, sprite: Option<&Sprite>, dest: CellRect, clip: Rect, fallback: Color) {
    match sprite {
        Some(sprite) => sprite.draw(buf, dest, clip, OCEAN),
        None => {
            for (x, y) in dest.visible_cells(clip) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char('█').set_fg(fallback).set_bg(OCEAN);
                }
            }
        }
    }
}

fn bottom_line(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + area.height.saturating_sub(1),
        width: area.width.saturating_sub(2),
        height: area.height.min(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::ScoreEntry;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(view_state: GameState, table: &HighScores, initials: Option<&InitialsPrompt>) -> Buffer {
        let player = Player::new(336.0, 236.0, 128.0, 4.0);
        let enemies = vec![Enemy::new(100.0, 100.0, 2.0, 64.0)];
        let projectiles = vec![Projectile::new(400.0, 300.0, 6.0)];
        let renderer = GameRenderer::new(Assets::default());

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state: view_state,
                    player: &player,
                    enemies: &enemies,
                    projectiles: &projectiles,
                    score: 1200,
                    health: 7,
                    field_width: 800.0,
                    field_height: 600.0,
                    high_scores: table,
                    initials,
                    area: frame.area(),
                };
                renderer.render(frame, &view);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_viewport_projection() {
        let viewport = Viewport::new(Rect::new(0, 0, 80, 30), 800.0, 600.0);
        assert_eq!(
            viewport.project(100.0, 100.0, 128.0, 128.0),
            CellRect {
                x: 10,
                y: 5,
                width: 12,
                height: 6,
            }
        );
        assert_eq!(viewport.cell(400.0, 300.0), Some((40, 15)));
        assert_eq!(viewport.cell(-6.0, 300.0), None);
        assert_eq!(viewport.cell(800.0, 300.0), None);
    }

    #[test]
    fn test_launch_screen_without_splash() {
        let text = screen_text(&draw(GameState::Launch, &HighScores::default(), None));
        assert!(text.contains("B A N S H E E"));
        assert!(text.contains("[Enter: Start]"));
        assert!(!text.contains("Score:"));
    }

    #[test]
    fn test_game_frame_shows_hud_and_entities() {
        let buffer = draw(GameState::Playing, &HighScores::default(), None);
        let text = screen_text(&buffer);
        assert!(text.contains("Score: 1200"));
        assert!(text.contains("Health: 7"));

        assert_eq!(buffer[(40u16, 15u16)].symbol(), "●");
        // Player hull at (336, 236) lands on cell (33, 11)
        assert_eq!(buffer[(34u16, 12u16)].symbol(), "█");
        assert_eq!(buffer[(34u16, 12u16)].fg, Color::Green);
        // Enemy hull at (100, 100) lands on cell (10, 5)
        assert_eq!(buffer[(11u16, 6u16)].fg, Color::Red);
        assert_eq!(buffer[(70u16, 25u16)].bg, OCEAN);
    }

    #[test]
    fn test_game_over_lists_scores() {
        let table = HighScores::from_entries(vec![
            ScoreEntry {
                score: 1200,
                initials: "KLM".to_string(),
            },
            ScoreEntry::new(300),
        ]);
        let text = screen_text(&draw(GameState::GameOver, &table, None));
        assert!(text.contains("=== GAME OVER ==="));
        assert!(text.contains("HIGH SCORES"));
        assert!(text.contains(" 1. KLM      1200"));
        assert!(text.contains(" 2. ---       300"));
        assert!(text.contains("Press R to restart"));
    }

    #[test]
    fn test_game_over_with_initials_prompt() {
        let table = HighScores::from_entries(vec![ScoreEntry::new(1200)]);
        let mut prompt = InitialsPrompt::default();
        prompt.push('k');
        let text = screen_text(&draw(GameState::GameOver, &table, Some(&prompt)));
        assert!(text.contains("You made the Top Ten!"));
        assert!(text.contains("K__"));
        assert!(!text.contains("Press R to restart"));
    }
}
