use std::time::Duration;

use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::Block as BlockWidget,
};
use ratatui_runtime::{App, Runtime};
use sparkfall_engine::{GameLoop, SessionStats, render::draw_frame};

use crate::view::{
    TerminalSurface,
    widgets::{
        BoardDisplay, GAME_OVER_BINDINGS, GameOverDisplay, KeyBindingDisplay, PLAYING_BINDINGS,
    },
};

use super::input::KeyTracker;

#[derive(Debug)]
pub(crate) struct PlayApp {
    game: GameLoop,
    keys: KeyTracker,
    surface: TerminalSurface,
    fps: f64,
}

impl PlayApp {
    pub(crate) fn new(game: GameLoop, fps: f64) -> Self {
        let mut surface = TerminalSurface::new(game.config());
        draw_frame(&game, &mut surface);
        Self {
            game,
            keys: KeyTracker::for_terminal(false),
            surface,
            fps,
        }
    }

    pub(crate) fn stats(&self) -> &SessionStats {
        self.game.stats()
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_frame_rate(self.fps);
        self.keys = KeyTracker::for_terminal(runtime.supports_key_release());
    }

    fn should_exit(&self) -> bool {
        self.game.state().is_quit()
    }

    fn update(&mut self, _runtime: &mut Runtime, events: &[Event], dt: Duration) {
        let inputs = self.keys.translate(events, dt);
        if self.game.tick(&inputs, dt).is_quit() {
            return;
        }
        draw_frame(&self.game, &mut self.surface);
    }

    fn draw(&self, frame: &mut Frame) {
        let stats = self.game.stats();
        let board = BoardDisplay::new(self.surface.front()).block(
            BlockWidget::bordered()
                .title(Line::from(" sparkfall ").centered())
                .title_bottom(Line::from(format!(" lines {} ", stats.cleared_lines)).centered()),
        );

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area] = Layout::horizontal([Constraint::Length(board.width())])
            .flex(Flex::Center)
            .areas(main_area);
        frame.render_widget(&board, board_area);

        let game_over = self.game.state().is_game_over();
        if game_over {
            let area = GameOverDisplay::area(main_area, board_area);
            let overlay = GameOverDisplay::new(self.game.config().palette.overlay);
            frame.render_widget(overlay, area);
        }

        let bindings = if game_over {
            GAME_OVER_BINDINGS
        } else {
            PLAYING_BINDINGS
        };
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use sparkfall_engine::GameConfig;

    use super::*;

    fn app() -> PlayApp {
        let game = GameLoop::with_seed(GameConfig::default(), 7).unwrap();
        PlayApp::new(game, 60.0)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_quit_key_exits() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        assert!(!app.should_exit());

        app.update(&mut runtime, &[press(KeyCode::Char('q'))], Duration::from_millis(16));
        assert!(app.should_exit());
    }

    #[test]
    fn test_update_presents_falling_piece() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        app.update(&mut runtime, &[], Duration::from_millis(16));

        let falling = app.game.config().palette.falling;
        let raster = app.surface.front();
        let painted = (0..raster.height())
            .flat_map(|y| (0..raster.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| raster.get(x, y) == Some(falling))
            .count();
        // Four cells of two by two dots each.
        assert_eq!(painted, 16);
    }

    #[test]
    fn test_draw_shows_help_line() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..24)
            .map(|y| (0..60).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        assert!(
            rows.iter().any(|row| row.contains("Rotate")),
            "help line missing: {rows:#?}"
        );
        assert!(rows.iter().any(|row| row.contains("sparkfall")));
    }
}
