use std::io::BufRead;
use std::ops::ControlFlow;
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::annotations::handlers::handle_text_msg;
use crate::capture::camera::{FileCamera, PickerCamera};
use crate::config::SnapcamConfig;
use crate::core::notice::{ConsolePresenter, Presenter};
use crate::domain::TextOverlay;
use crate::export::{PhotoLibrary, TempShare};
use crate::render::text::Typeface;
use crate::session::messages::{HELP, Msg, TextMsg};
use crate::session::state::{EditorError, EditSession};

pub(crate) async fn run() -> anyhow::Result<()> {
    let config = SnapcamConfig::load();
    let typeface = Typeface::resolve(config.font_path.as_deref());
    let mut app = App::new(config, typeface, ConsolePresenter);

    // Never joined: `quit` must not wait for another input line
    let (tx, rx) = mpsc::channel::<Msg>(16);
    std::thread::spawn(move || read_commands(std::io::stdin().lock(), tx));

    println!("{HELP}");
    app.drive(rx).await;
    log::debug!("Session ended");
    Ok(())
}

/// Turn input lines into messages until EOF or the receiver goes away
fn read_commands(input: impl BufRead, tx: mpsc::Sender<Msg>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read command: {err}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Msg>() {
            Ok(msg) => {
                if tx.blocking_send(msg).is_err() {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
}

pub struct App<P: Presenter> {
    pub config: SnapcamConfig,
    pub session: EditSession<P>,
    /// Where style changes are persisted; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub library: PhotoLibrary,
    pub share: TempShare,
}

impl<P: Presenter> App<P> {
    pub fn new(config: SnapcamConfig, typeface: Typeface, presenter: P) -> Self {
        let session = EditSession::new(&config, typeface, presenter);
        let library = PhotoLibrary::new(config.save_location);
        Self {
            config,
            session,
            config_path: SnapcamConfig::path(),
            library,
            share: TempShare,
        }
    }

    /// Handle messages until `quit` or until every sender is gone
    pub async fn drive(&mut self, mut rx: mpsc::Receiver<Msg>) {
        while let Some(msg) = rx.recv().await {
            if self.update(msg).await.is_break() {
                break;
            }
        }
    }

    /// Handle one message; `Break` ends the session
    pub async fn update(&mut self, msg: Msg) -> ControlFlow<()> {
        match msg {
            Msg::Capture(path) => {
                let result = match path {
                    Some(path) => self.session.capture(&FileCamera::new(path)).await,
                    None => self.session.capture(&PickerCamera).await,
                };
                match result {
                    Ok(true) => self.print_status(),
                    Ok(false) => {}
                    Err(err) => log::debug!("{err}"),
                }
            }
            Msg::Close => self.session.reset(),
            Msg::Filter(kind) => {
                if !self.session.apply_filter(kind) {
                    println!("Take a photo first");
                }
            }
            Msg::Text(text_msg) => {
                if let Some(reply) = self.handle_text(text_msg) {
                    println!("{reply}");
                }
            }
            Msg::List => self.print_status(),
            Msg::Save => match self.session.save(&self.library) {
                Ok(path) => println!("{}", path.display()),
                Err(EditorError::NoBaseImage) => println!("Nothing to save"),
                Err(err) => log::debug!("{err}"),
            },
            Msg::Share => match self.session.share(&self.share) {
                Ok(shared) => println!("Shared {}", shared.path.display()),
                Err(EditorError::NoBaseImage) => println!("Nothing to share"),
                Err(err) => log::debug!("{err}"),
            },
            Msg::Help => println!("{HELP}"),
            Msg::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Apply a text message, returning the line to show the user
    fn handle_text(&mut self, msg: TextMsg) -> Option<String> {
        self.remember_style(&msg);
        let edits_overlay = matches!(msg, TextMsg::Add(_) | TextMsg::Nudge(..) | TextMsg::Drag(_));
        match handle_text_msg(&mut self.session, msg) {
            Some(overlay) => Some(describe(&overlay)),
            None if edits_overlay && !self.session.has_photo() => {
                Some("Take a photo first".to_string())
            }
            None => None,
        }
    }

    /// Persist text style changes like any other setting
    fn remember_style(&mut self, msg: &TextMsg) {
        match msg {
            TextMsg::SetColor(color) => self.config.text_color = *color,
            TextMsg::SetShadow(shadow) => self.config.text_shadow = *shadow,
            _ => return,
        }
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Err(err) = self.config.save_to(path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    fn print_status(&self) {
        let Some(photo) = self.session.base_image() else {
            println!("No photo");
            return;
        };
        let canvas = self.session.canvas_size().unwrap_or_default();
        let filters: Vec<&str> = self
            .session
            .applied_filters()
            .iter()
            .map(|f| f.label())
            .collect();
        println!(
            "Photo {}x{} on canvas {}x{}, filters: {}",
            photo.width(),
            photo.height(),
            canvas.width,
            canvas.height,
            if filters.is_empty() {
                "none".to_string()
            } else {
                filters.join(", ")
            }
        );
        for overlay in self.session.overlays() {
            println!("  {}", describe(overlay));
        }
    }
}

fn describe(overlay: &TextOverlay) -> String {
    format!(
        "#{} {:?} at ({:.1}, {:.1}) size {:.1}x{:.1}",
        overlay.id,
        overlay.text,
        overlay.center.x,
        overlay.center.y,
        overlay.size.width,
        overlay.size.height
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notice::{Notice, NoticeKind, RecordingPresenter};
    use crate::domain::Point;
    use image::{Rgba, RgbaImage};

    fn app(presenter: &RecordingPresenter) -> App<&RecordingPresenter> {
        let mut app = App::new(SnapcamConfig::default(), Typeface::Fixed, presenter);
        app.config_path = None;
        app
    }

    async fn send(app: &mut App<&RecordingPresenter>, line: &str) -> ControlFlow<()> {
        app.update(line.parse().unwrap()).await
    }

    #[tokio::test]
    async fn test_capture_edit_save_flow() {
        let dir = tempfile::tempdir().unwrap();
        let photo_path = dir.path().join("photo.png");
        RgbaImage::from_pixel(300, 600, Rgba([30, 90, 150, 255]))
            .save(&photo_path)
            .unwrap();

        let presenter = RecordingPresenter::default();
        let mut app = app(&presenter);
        app.library = PhotoLibrary::in_dir(dir.path().join("saved"));

        send(&mut app, &format!("capture {}", photo_path.display())).await;
        send(&mut app, "filter sepia").await;
        send(&mut app, "text Hi").await;
        send(&mut app, "drag 0 -500 0").await;
        send(&mut app, "save").await;

        let overlay = &app.session.overlays()[0];
        assert_eq!(overlay.center, Point::new(18.0, 300.0));
        assert_eq!(presenter.notices(), vec![Notice::photo_saved()]);
        assert_eq!(std::fs::read_dir(dir.path().join("saved")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_photo_file_reports_capture_failure() {
        let presenter = RecordingPresenter::default();
        let mut app = app(&presenter);

        send(&mut app, "capture /definitely/not/here.png").await;
        assert!(!app.session.has_photo());

        let notices = presenter.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Error);
        assert_eq!(notices[0].title, "Error");
        assert!(notices[0].message.starts_with("Failed to capture photo."));
        assert!(notices[0].message.contains("/definitely/not/here.png"));
    }

    #[tokio::test]
    async fn test_quit_stops_while_senders_are_alive() {
        let presenter = RecordingPresenter::default();
        let mut app = app(&presenter);
        let (tx, rx) = mpsc::channel(4);

        tx.send("text Hi".parse().unwrap()).await.unwrap();
        tx.send(Msg::Quit).await.unwrap();
        tx.send("list".parse().unwrap()).await.unwrap();

        app.drive(rx).await;
        assert!(tx.is_closed());
    }

    #[test]
    fn test_read_commands_skips_blank_and_bad_lines() {
        let input = std::io::Cursor::new("\ncapture\nbogus\n  \nfilter mono\nquit\n");
        let (tx, mut rx) = mpsc::channel(8);
        read_commands(input, tx);

        let mut received = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            received.push(msg);
        }
        assert_eq!(received.len(), 3);
        assert!(matches!(received[0], Msg::Capture(None)));
        assert!(matches!(received[2], Msg::Quit));
    }

    #[test]
    fn test_style_commands_without_photo_are_silent_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = RecordingPresenter::default();
        let mut app = app(&presenter);
        let path = dir.path().join("config.json");
        app.config_path = Some(path.clone());

        assert_eq!(app.handle_text("shadow on".parse::<Msg>().map(text).unwrap()), None);
        assert_eq!(
            app.handle_text("text Hi".parse::<Msg>().map(text).unwrap()),
            Some("Take a photo first".to_string())
        );
        assert!(SnapcamConfig::load_from(&path).unwrap().text_shadow);
    }

    fn text(msg: Msg) -> TextMsg {
        match msg {
            Msg::Text(text_msg) => text_msg,
            other => panic!("not a text command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_and_quit() {
        let presenter = RecordingPresenter::default();
        let mut app = app(&presenter);
        app.session
            .load_photo(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));

        assert!(send(&mut app, "close").await.is_continue());
        assert!(!app.session.has_photo());
        assert!(send(&mut app, "quit").await.is_break());
    }
}
