use std::time::{Duration, Instant};

use log::info;

use crate::canvas::{Canvas, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::cli::Args;
use crate::panel::{Action, Panel, Theme};
use crate::scheduler::{Scheduler, TickHandle};
use crate::timer::{Countdown, Host};

/// Everything the countdown touches while it runs.
struct Shell<'a> {
    scheduler: &'a mut Scheduler,
    panel: &'a mut Panel,
}

impl Host for Shell<'_> {
    fn refresh(&mut self, display: &str) {
        self.panel.set_display(display);
    }

    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.scheduler.schedule_after(delay)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.scheduler.cancel(handle);
    }
}

/// The timer application, independent of the window it is shown in.
pub struct App {
    countdown: Countdown,
    scheduler: Scheduler,
    panel: Panel,
    canvas: Canvas,
}

impl App {
    pub fn new(args: &Args) -> Self {
        let countdown = Countdown::new();
        let panel = Panel::new(&args.increments, &countdown.display());
        let canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, Theme::default().background);

        Self {
            countdown,
            scheduler: Scheduler::new(),
            panel,
            canvas,
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Run a user action against the countdown.
    pub fn dispatch(&mut self, action: Action) {
        let mut shell = Shell {
            scheduler: &mut self.scheduler,
            panel: &mut self.panel,
        };

        match action {
            Action::AddMinutes(minutes) => self.countdown.add_duration(minutes, &mut shell),
            Action::Start => self.countdown.start(&mut shell),
            Action::Stop => self.countdown.stop(&mut shell),
            Action::Clear => self.countdown.clear(&mut shell),
        }
    }

    /// Fire every tick that is due at `now`.
    pub fn fire_expired(&mut self, now: Instant) {
        for handle in self.scheduler.expired(now) {
            let mut shell = Shell {
                scheduler: &mut self.scheduler,
                panel: &mut self.panel,
            };
            self.countdown.fire(handle, &mut shell);
        }
    }

    /// When the event loop has to wake up for the next tick.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Track the cursor, in canvas pixels.
    pub fn cursor_moved(&mut self, position: Option<(usize, usize)>) {
        self.panel.hover(position);
    }

    /// Press whichever button is under the cursor.
    pub fn click(&mut self) {
        if let Some(action) = self.panel.pressed() {
            info!("Clicked {:?}", action);
            self.dispatch(action);
        }
    }

    /// The action of the n-th duration button, counting from zero.
    pub fn duration_action(&self, index: usize) -> Option<Action> {
        self.panel.duration_action(index)
    }

    /// If the window should be redrawn.
    pub fn should_draw(&self) -> bool {
        self.panel.should_draw()
    }

    /// Render the panel to a framebuffer.
    ///
    /// # Arguments
    ///
    /// * `target` - The frame of a [`pixels::Pixels`] sized
    ///   [`CANVAS_WIDTH`] x [`CANVAS_HEIGHT`].
    pub fn draw(&mut self, target: &mut [u8]) {
        self.panel.render(&mut self.canvas);
        self.canvas.draw(target);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::timer::TICK_INTERVAL;

    fn app() -> App {
        App::new(&Args::parse_from(["pomodoro"]))
    }

    /// Let the next tick come due.
    fn advance(app: &mut App) {
        app.fire_expired(Instant::now() + TICK_INTERVAL * 2);
    }

    fn center_of(app: &App, action: Action) -> (usize, usize) {
        let button = app
            .panel
            .buttons()
            .iter()
            .find(|b| b.action == action)
            .unwrap();
        (
            button.rect.x + button.rect.width / 2,
            button.rect.y + button.rect.height / 2,
        )
    }

    #[test]
    fn test_initial_state() {
        let app = app();

        assert_eq!(app.countdown().remaining_seconds(), 0);
        assert!(!app.countdown().is_running());
        assert!(app.next_deadline().is_none());
        assert!(app.should_draw());
        assert_eq!(app.panel.display(), "00:00");
    }

    #[test]
    fn test_click() {
        let mut app = app();

        app.cursor_moved(Some(center_of(&app, Action::AddMinutes(15))));
        app.click();
        assert_eq!(app.countdown().remaining_seconds(), 900);
        assert_eq!(app.panel.display(), "15:00");

        app.cursor_moved(Some(center_of(&app, Action::Start)));
        app.click();
        assert!(app.countdown().is_running());
        assert_eq!(app.panel.display(), "14:59");

        // Nothing under the cursor
        app.cursor_moved(None);
        app.click();
        assert_eq!(app.countdown().remaining_seconds(), 899);
    }

    #[test]
    fn test_duration_action() {
        let app = app();

        assert_eq!(app.duration_action(0), Some(Action::AddMinutes(5)));
        assert_eq!(app.duration_action(3), Some(Action::AddMinutes(60)));
        assert_eq!(app.duration_action(4), None);
    }

    #[test]
    fn test_ticks_follow_scheduler() {
        let mut app = app();

        app.dispatch(Action::AddMinutes(5));
        app.dispatch(Action::Start);
        assert_eq!(app.countdown().remaining_seconds(), 299);

        let deadline = app.next_deadline().unwrap();
        assert!(deadline > Instant::now());

        // Not due yet
        app.fire_expired(deadline - Duration::from_millis(1));
        assert_eq!(app.countdown().remaining_seconds(), 299);

        app.fire_expired(deadline);
        assert_eq!(app.countdown().remaining_seconds(), 298);
        assert_eq!(app.scheduler.len(), 1);
    }

    #[test]
    fn test_repeated_start() {
        let mut app = app();

        app.dispatch(Action::AddMinutes(5));
        for _ in 0..5 {
            app.dispatch(Action::Start);
        }
        assert_eq!(app.scheduler.len(), 1);

        advance(&mut app);
        assert_eq!(app.countdown().remaining_seconds(), 298);
        assert_eq!(app.scheduler.len(), 1);
    }

    #[test]
    fn test_stop_cancels_tick() {
        let mut app = app();

        app.dispatch(Action::AddMinutes(5));
        app.dispatch(Action::Start);
        app.dispatch(Action::Stop);
        assert!(app.scheduler.is_empty());
        assert!(app.next_deadline().is_none());

        advance(&mut app);
        assert_eq!(app.countdown().remaining_seconds(), 299);
    }

    #[test]
    fn test_clear() {
        let mut app = app();

        app.dispatch(Action::AddMinutes(30));
        app.dispatch(Action::Start);
        advance(&mut app);
        app.dispatch(Action::Clear);

        assert_eq!(app.countdown().remaining_seconds(), 0);
        assert!(!app.countdown().is_running());
        assert!(app.scheduler.is_empty());
        assert_eq!(app.panel.display(), "00:00");
    }

    #[test]
    fn test_full_run() {
        let mut app = app();

        app.dispatch(Action::AddMinutes(5));
        app.dispatch(Action::Start);
        for _ in 1..300 {
            assert_eq!(app.scheduler.len(), 1);
            advance(&mut app);
        }

        assert_eq!(app.countdown().remaining_seconds(), 0);
        assert!(!app.countdown().is_running());
        assert!(app.next_deadline().is_none());
        assert_eq!(app.panel.display(), "00:00");
    }

    #[test]
    fn test_draw() {
        let mut app = app();
        let mut frame = vec![0u8; CANVAS_WIDTH * CANVAS_HEIGHT * 4];

        app.draw(&mut frame);
        assert!(!app.should_draw());

        let bg = Theme::default().background;
        assert_eq!(frame[..4], [bg.r, bg.g, bg.b, bg.a]);

        app.dispatch(Action::AddMinutes(5));
        assert!(app.should_draw());
    }
}
