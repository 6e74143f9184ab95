use fltk::{
    app::Sender,
    enums::{Align, FrameType},
    frame::Frame,
    group::Flex,
    menu::MenuBar,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::tab_bar::{TAB_BAR_HEIGHT, TabBar};
use crate::app::messages::Message;
use crate::app::theme_store::UNSTYLED;

pub const STATUS_BAR_HEIGHT: i32 = 24;

/// Every named widget slot, populated once at construction. Handlers receive
/// these explicitly instead of looking widgets up at runtime.
pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub tab_bar: TabBar,
    pub text_editor: TextEditor,
    pub status_bar: Frame,
}

pub fn build_main_window(sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 900, 600, "Untitled - QuillPad");
    wind.set_xclass("QuillPad");

    let mut flex = Flex::new(0, 0, 900, 600, None);
    flex.set_type(fltk::group::FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let tab_bar = TabBar::new(0, 30, 900, sender.clone(), &UNSTYLED);
    flex.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    let mut text_editor = TextEditor::new(0, 0, 0, 0, "");
    text_editor.set_buffer(TextBuffer::default());

    let mut status_bar = Frame::default().with_label("Ln 1, Col 1, Ch 0");
    status_bar.set_frame(FrameType::FlatBox);
    status_bar.set_align(Align::Left | Align::Inside);
    status_bar.set_label_size(12);
    flex.fixed(&status_bar, STATUS_BAR_HEIGHT);

    flex.end();
    wind.resizable(&flex);

    MainWidgets {
        wind,
        flex,
        menu,
        tab_bar,
        text_editor,
        status_bar,
    }
}
