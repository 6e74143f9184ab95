use fltk::{
    app,
    enums::{Event, EventState},
    prelude::*,
};

use quill_pad::app::input::{Scroll, dispatch_wheel};
use quill_pad::app::messages::Message;
use quill_pad::app::settings::AppSettings;
use quill_pad::app::state::AppState;
use quill_pad::app::theme_store::ThemeStore;
use quill_pad::ui::main_window::build_main_window;
use quill_pad::ui::menu::build_menu;

fn main() {
    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let settings = AppSettings::load();
    let theme_store = ThemeStore::new(AppSettings::theme_dir());

    let mut widgets = build_main_window(&sender);
    build_menu(&mut widgets.menu, &sender);

    // The window close button goes through the same quit path as File/Quit.
    widgets.wind.set_callback({
        let sender = sender;
        move |_| sender.send(Message::WindowClose)
    });

    // Editor-level input: ctrl+wheel zoom, plus cursor tracking for the
    // status bar. Everything else falls through to the editor.
    widgets.text_editor.handle({
        let sender = sender;
        move |_, event| match event {
            Event::MouseWheel => {
                let ctrl = app::event_state().contains(EventState::Ctrl);
                let scroll = match app::event_dy() {
                    app::MouseWheel::Up => Some(Scroll::Up),
                    app::MouseWheel::Down => Some(Scroll::Down),
                    _ => None,
                };
                match scroll.and_then(|s| dispatch_wheel(s, ctrl)) {
                    Some(msg) => {
                        sender.send(msg);
                        true
                    }
                    None => false,
                }
            }
            Event::KeyUp | Event::Released => {
                sender.send(Message::StatusRefresh);
                false
            }
            _ => false,
        }
    });

    widgets.wind.show();

    let mut state = AppState::new(widgets, sender, settings, theme_store);

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::FileNew => state.insert_new_tab(),
                Message::FileOpen => state.file_open(),
                Message::FileSave => {
                    let active = state.tab_registry.active_index();
                    state.file_save(active);
                }
                Message::FileSaveAs => {
                    let active = state.tab_registry.active_index();
                    state.file_save_as(active);
                }
                Message::FileSaveAll => state.save_all(),
                Message::FileQuit | Message::WindowClose => {
                    if state.file_quit() {
                        app.quit();
                    }
                }

                Message::TabActivate(index) => state.switch_to_tab(index),
                Message::TabClose(index) => {
                    state.close_tab(index);
                }
                Message::TabCloseActive => {
                    let active = state.tab_registry.active_index();
                    state.close_tab(active);
                }

                Message::ShowFind => state.show_find(),
                Message::FindNext => state.find_next(),
                Message::ShowReplace => state.show_replace(),

                Message::ZoomIn => state.zoom_in(),
                Message::ZoomOut => state.zoom_out(),

                Message::OpenThemePicker => state.open_theme_picker(),

                Message::BufferModified(_) => {
                    state.update_window_title();
                    state.update_status();
                    state.rebuild_tab_bar();
                }
                Message::StatusRefresh => state.update_status(),
            }
        }
    }
}
