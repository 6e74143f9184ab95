use fltk::{
    enums::Color, frame::Frame, menu::MenuBar, prelude::*, text::TextEditor, window::Window,
};

use crate::app::theme_store::{Rgb, ThemePalette, UNSTYLED};

pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Apply a palette wholesale to the main widgets. Passing None resets to the
/// unstyled defaults; application is never additive, the previous palette is
/// always replaced.
pub fn apply_palette(
    editor: &mut TextEditor,
    window: &mut Window,
    menu: &mut MenuBar,
    status_bar: &mut Frame,
    palette: Option<&ThemePalette>,
) {
    let p = palette.copied().unwrap_or(UNSTYLED);

    editor.set_color(to_color(p.editor_bg));
    editor.set_text_color(to_color(p.editor_fg));
    editor.set_cursor_color(to_color(p.cursor));
    editor.set_selection_color(to_color(p.selection));

    window.set_color(to_color(p.window_bg));
    window.set_label_color(to_color(p.menu_fg));

    menu.set_color(to_color(p.menu_bg));
    menu.set_text_color(to_color(p.menu_fg));
    menu.set_selection_color(to_color(p.selection));

    status_bar.set_color(to_color(p.menu_bg));
    status_bar.set_label_color(to_color(p.menu_fg));

    editor.redraw();
    window.redraw();
    menu.redraw();
    status_bar.redraw();
}
