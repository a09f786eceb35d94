// src/gui/app.rs
use std::{
    error::Error,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use chrono::{DateTime, Utc};
use eframe::egui;

use crate::{
    config::{self, state::AppState},
    data::Author,
    notify::Notification,
    schedule,
    tracker::{Summary, Tracker},
};

use super::{
    components,
    progress::{self, BannerNotifier, Shared},
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let opts = config::file::load(None)?;
    let log_guard = crate::log::init(&opts.store_dir, false);
    let tracker = Arc::new(Tracker::from_options(&opts)?);
    let state = AppState::new(opts);

    eframe::run_native(
        "Scholar Watch",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, state, tracker)))),
    )?;
    drop(log_guard);
    Ok(())
}

/// Worker → UI.
pub enum Msg {
    /// A button-started job ended; the text goes to the status line.
    Finished(Result<String, String>),
    /// The background watch loop completed a cycle.
    Reload,
}

pub struct App {
    pub state: AppState,
    pub tracker: Arc<Tracker>,
    pub ctx: egui::Context,

    // snapshot for drawing, reloaded after every mutation
    pub authors: Vec<Author>,
    pub summary: Summary,
    pub last_update: Option<DateTime<Utc>>,

    // output text field for exports
    pub out_path_text: String,

    // status/progress (workers write here)
    pub status: Shared<String>,
    pub banner: Shared<Option<Notification>>,
    pub running: bool,

    pub(crate) tx: Sender<Msg>,
    rx: Receiver<Msg>,
    stop: Arc<AtomicBool>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState, tracker: Arc<Tracker>) -> Self {
        let (tx, rx) = mpsc::channel();
        let out_path_text = state
            .options
            .export
            .default_path(config::consts::DEFAULT_AUTHORS_FILE)
            .to_string_lossy()
            .into_owned();

        let mut app = Self {
            state,
            tracker,
            ctx: cc.egui_ctx.clone(),
            authors: Vec::new(),
            summary: Summary::default(),
            last_update: None,
            out_path_text,
            status: Arc::new(Mutex::new(s!("Idle"))),
            banner: Arc::new(Mutex::new(None)),
            running: false,
            tx,
            rx,
            stop: Arc::new(AtomicBool::new(false)),
        };
        app.reload();
        app.start_watch();
        logf!("Init: {} tracked", plural!(app.authors.len(), "author"));
        app
    }

    fn start_watch(&self) {
        let tracker = Arc::clone(&self.tracker);
        let sched = self.state.options.schedule.clone();
        let notifier = self.notifier();
        let stop = Arc::clone(&self.stop);
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();

        thread::spawn(move || {
            schedule::watch(&tracker, &sched, &notifier, &stop, |_| {
                let _ = tx.send(Msg::Reload);
                ctx.request_repaint();
            });
        });
    }

    pub fn notifier(&self) -> BannerNotifier {
        BannerNotifier::new(Arc::clone(&self.banner), self.ctx.clone())
    }

    /// Re-read the store into the draw snapshot.
    pub fn reload(&mut self) {
        match self.tracker.authors() {
            Ok(a) => self.authors = a,
            Err(e) => {
                loge!("Reload: {e}");
                self.set_status(format!("Error: {e}"));
            }
        }
        let now = self.tracker.now();
        self.summary = Summary {
            authors: self.authors.len(),
            total_citations: self.authors.iter().map(|a| u64::from(a.metrics.total_citations)).sum(),
            with_changes: self.authors.iter().filter(|a| a.is_new(now)).count(),
        };
        self.last_update = self.tracker.last_update_time().ok().flatten();

        let gone = self
            .state
            .gui
            .selected_user
            .as_ref()
            .is_some_and(|id| !self.authors.iter().any(|a| &a.user_id == id));
        if gone {
            self.state.gui.selected_user = None;
        }
    }

    pub fn selected_author(&self) -> Option<&Author> {
        let id = self.state.gui.selected_user.as_ref()?;
        self.authors.iter().find(|a| &a.user_id == id)
    }

    #[inline]
    pub fn set_status<T: Into<String>>(&self, msg: T) {
        progress::set(&self.status, msg.into());
    }

    fn poll(&mut self) {
        let mut dirty = false;
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Msg::Finished(r) => {
                    self.running = false;
                    match r {
                        Ok(text) => self.set_status(text),
                        Err(e) => self.set_status(format!("Error: {e}")),
                    }
                }
                Msg::Reload => {}
            }
            dirty = true;
        }
        if dirty {
            self.reload();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        logd!("Exit: watch loop signalled");
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll();
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            components::banner::draw(ui, self);
            components::add_bar::draw(ui, self);
            components::summary::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(progress::get(&self.status));
        });

        if self.state.gui.selected_user.is_some() {
            egui::SidePanel::right("papers")
                .resizable(true)
                .default_width(460.0)
                .show(ctx, |ui| {
                    components::papers_panel::draw(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            components::export_bar::draw(ui, self);
            ui.separator();
            components::author_table::draw(ui, self);
        });
    }
}
