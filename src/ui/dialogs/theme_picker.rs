use fltk::{button::Button, frame::Frame, menu::Choice, prelude::*, window::Window};
use std::cell::RefCell;
use std::rc::Rc;

/// Show the theme picker. Returns the chosen theme name if the user
/// accepted, None on cancel or close.
pub fn show_theme_picker(themes: &[String], current: &str) -> Option<String> {
    let mut dialog_win = Window::default()
        .with_size(320, 110)
        .with_label("Themes")
        .center_screen();

    Frame::default()
        .with_pos(20, 20)
        .with_size(70, 30)
        .with_label("Theme:");
    let mut choice = Choice::default().with_pos(100, 20).with_size(200, 30);
    for name in themes {
        // add_choice treats '/' as a submenu separator; theme names never
        // contain one, so plain names are safe here.
        choice.add_choice(name);
    }
    if let Some(idx) = themes.iter().position(|t| t == current) {
        choice.set_value(idx as i32);
    } else if !themes.is_empty() {
        choice.set_value(0);
    }

    let mut ok_btn = Button::default()
        .with_pos(110, 65)
        .with_size(90, 30)
        .with_label("OK");
    let mut cancel_btn = Button::default()
        .with_pos(210, 65)
        .with_size(90, 30)
        .with_label("Cancel");

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.make_modal(true);
    dialog_win.show();

    let result = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog_win.clone();
    let names: Vec<String> = themes.to_vec();
    ok_btn.set_callback(move |_| {
        let idx = choice.value();
        if idx >= 0 {
            if let Some(name) = names.get(idx as usize) {
                *result_ok.borrow_mut() = Some(name.clone());
            }
        }
        dialog_ok.clone().hide();
    });

    let dialog_cancel = dialog_win.clone();
    cancel_btn.set_callback(move |_| {
        dialog_cancel.clone().hide();
    });

    let dialog_x = dialog_win.clone();
    dialog_win.set_callback(move |_| {
        dialog_x.clone().hide();
    });

    super::run_dialog(&dialog_win);

    result.take()
}
