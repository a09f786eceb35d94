// src/gui/progress.rs
use std::sync::{Arc, Mutex, PoisonError};

use eframe::egui;

use crate::{
    notify::{Notification, Notifier},
    progress::Progress,
};

pub type Shared<T> = Arc<Mutex<T>>;

pub fn set<T>(slot: &Shared<T>, value: T) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
}

pub fn get<T: Clone>(slot: &Shared<T>) -> T {
    slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

pub struct GuiProgress {
    status: Shared<String>,
    ctx: egui::Context,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Shared<String>, ctx: egui::Context) -> Self {
        Self { status, ctx, done: 0, failed: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        set(&self.status, msg.into());
        self.ctx.request_repaint();
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("Refreshing {}…", plural!(total, "author")));
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_done(&mut self, name: &str) {
        self.done += 1;
        self.set_status(format!("Fetched {name} ({}/{})", self.done + self.failed, self.total));
    }
    fn item_failed(&mut self, name: &str, _error: &str) {
        self.failed += 1;
        self.set_status(format!("Failed {name} ({}/{})", self.done + self.failed, self.total));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Refresh complete"));
        } else {
            self.set_status(format!("Refresh complete ({} ok, {} failed)", self.done, self.failed));
        }
    }
}

/// Puts the latest notification in the window's banner slot.
#[derive(Clone)]
pub struct BannerNotifier {
    banner: Shared<Option<Notification>>,
    ctx: egui::Context,
}

impl BannerNotifier {
    pub fn new(banner: Shared<Option<Notification>>, ctx: egui::Context) -> Self {
        Self { banner, ctx }
    }
}

impl Notifier for BannerNotifier {
    fn notify(&self, n: &Notification) {
        logf!("Banner: {}", n.title);
        set(&self.banner, Some(n.clone()));
        self.ctx.request_repaint();
    }
}
