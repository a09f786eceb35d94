// src/gui/actions/manage.rs
//
// Store-only mutations; fast enough for the UI thread.

use crate::gui::app::App;

pub fn remove(app: &mut App, user_id: &str) {
    match app.tracker.remove_author(user_id) {
        Ok(a) => app.set_status(format!("Removed {}", a.name)),
        Err(e) => {
            loge!("Remove {user_id}: {e}");
            app.set_status(format!("Error: {e}"));
        }
    }
    app.reload();
}

pub fn mark_read(app: &mut App, user_id: &str) {
    if let Err(e) = app.tracker.mark_read(user_id) {
        loge!("Mark read {user_id}: {e}");
        app.set_status(format!("Error: {e}"));
    }
    app.reload();
}

pub fn mark_all_read(app: &mut App) {
    match app.tracker.mark_all_read() {
        Ok(n) => app.set_status(format!("Cleared {}", plural!(n, "marker"))),
        Err(e) => app.set_status(format!("Error: {e}")),
    }
    app.reload();
}
