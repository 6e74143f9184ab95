use fltk::{button::Button, frame::Frame, input::Input, prelude::*, window::Window};
use std::cell::RefCell;
use std::rc::Rc;

/// Show the Replace dialog. Returns (find, with) if the user accepted,
/// None on cancel or close. Applying the replacement is the caller's job.
pub fn show_replace_dialog() -> Option<(String, String)> {
    let mut dialog_win = Window::default()
        .with_size(400, 140)
        .with_label("Replace")
        .center_screen();

    Frame::default()
        .with_pos(20, 20)
        .with_size(70, 30)
        .with_label("Find:");
    let find_input = Input::default().with_pos(100, 20).with_size(280, 30);

    Frame::default()
        .with_pos(20, 55)
        .with_size(70, 30)
        .with_label("With:");
    let with_input = Input::default().with_pos(100, 55).with_size(280, 30);

    let mut ok_btn = Button::default()
        .with_pos(190, 100)
        .with_size(90, 30)
        .with_label("OK");
    let mut cancel_btn = Button::default()
        .with_pos(290, 100)
        .with_size(90, 30)
        .with_label("Cancel");

    dialog_win.end();
    dialog_win.make_resizable(false);
    dialog_win.make_modal(true);
    dialog_win.show();

    let result = Rc::new(RefCell::new(None));

    let result_ok = result.clone();
    let dialog_ok = dialog_win.clone();
    ok_btn.set_callback(move |_| {
        *result_ok.borrow_mut() = Some((find_input.value(), with_input.value()));
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
