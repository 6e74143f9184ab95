use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    draw,
    enums::{Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::document::Document;
use crate::app::messages::Message;
use crate::app::theme_store::ThemePalette;
use crate::ui::theme::to_color;

pub const TAB_BAR_HEIGHT: i32 = 30;

const MIN_TAB_WIDTH: i32 = 60;
const MAX_TAB_WIDTH: i32 = 200;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;
const PLUS_BTN_WIDTH: i32 = 28;
const PLUS_BTN_MARGIN: i32 = 4;

struct TabInfo {
    display_name: String,
    is_dirty: bool,
    is_active: bool,
}

#[derive(Clone, Copy)]
enum LayoutItem {
    Tab { index: usize, x: i32, width: i32 },
    PlusButton { x: i32 },
}

#[derive(Clone, Copy, PartialEq)]
enum HitResult {
    Tab { index: usize, is_close: bool },
    PlusButton,
    None,
}

#[derive(Clone, Copy)]
struct TabColors {
    bar_bg: Color,
    active_bg: Color,
    inactive_bg: Color,
    active_text: Color,
    inactive_text: Color,
    close_hover_bg: Color,
}

impl TabColors {
    fn from_palette(p: &ThemePalette) -> Self {
        Self {
            bar_bg: to_color(p.window_bg),
            active_bg: to_color(p.editor_bg),
            inactive_bg: to_color(p.menu_bg),
            active_text: to_color(p.editor_fg),
            inactive_text: to_color(p.menu_fg),
            close_hover_bg: to_color(p.selection),
        }
    }
}

struct TabBarState {
    tabs: Vec<TabInfo>,
    layout: Vec<LayoutItem>,
    colors: TabColors,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    hover_plus: bool,
    sender: Sender<Message>,
    widget_w: i32,
}

/// One tab per document plus the sentinel "+" slot pinned at the end.
/// All hits are resolved on mouse release: left-release activates,
/// middle-release (or the close glyph) closes, and any release on the
/// sentinel inserts a new blank document regardless of button or modifiers.
pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>, palette: &ThemePalette) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            tabs: Vec::new(),
            layout: Vec::new(),
            colors: TabColors::from_palette(palette),
            hover_tab_index: None,
            hover_close: false,
            hover_plus: false,
            sender,
            widget_w: w,
        }));

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let st = draw_state.borrow();
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        Self { widget, state }
    }

    pub fn rebuild(&mut self, documents: &[Document], active_index: usize) {
        let mut st = self.state.borrow_mut();
        st.widget_w = self.widget.w();
        st.tabs.clear();
        for (i, doc) in documents.iter().enumerate() {
            st.tabs.push(TabInfo {
                display_name: doc.display_name.clone(),
                is_dirty: doc.is_dirty(),
                is_active: i == active_index,
            });
        }
        st.hover_tab_index = None;
        st.hover_close = false;
        compute_layout(&mut st);
        drop(st);
        self.widget.redraw();
    }

    pub fn apply_palette(&mut self, palette: &ThemePalette) {
        self.state.borrow_mut().colors = TabColors::from_palette(palette);
        self.widget.redraw();
    }
}

// --- Layout computation ---

fn compute_layout(st: &mut TabBarState) {
    st.layout.clear();

    if st.tabs.is_empty() {
        st.layout.push(LayoutItem::PlusButton { x: PLUS_BTN_MARGIN });
        return;
    }

    let tab_count = st.tabs.len() as i32;
    let fixed = PLUS_BTN_WIDTH + PLUS_BTN_MARGIN + TAB_GAP * (tab_count - 1);
    let available = st.widget_w - fixed;
    let tab_width = (available / tab_count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    let mut cursor_x = 0i32;
    for index in 0..st.tabs.len() {
        st.layout.push(LayoutItem::Tab {
            index,
            x: cursor_x,
            width: tab_width,
        });
        cursor_x += tab_width + TAB_GAP;
    }
    st.layout.push(LayoutItem::PlusButton {
        x: cursor_x + PLUS_BTN_MARGIN,
    });
}

// --- Hit-testing ---

fn hit_test_layout(items: &[LayoutItem], wy: i32, mx: i32, my: i32) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }

    for item in items {
        match item {
            LayoutItem::Tab { index, x, width } => {
                if mx >= *x && mx < *x + *width {
                    let close_x = *x + *width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
                    let close_y = wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2;
                    let is_close = mx >= close_x
                        && mx <= close_x + CLOSE_BTN_SIZE
                        && my >= close_y
                        && my <= close_y + CLOSE_BTN_SIZE;
                    return HitResult::Tab {
                        index: *index,
                        is_close,
                    };
                }
            }
            LayoutItem::PlusButton { x } => {
                if mx >= *x && mx < *x + PLUS_BTN_WIDTH {
                    return HitResult::PlusButton;
                }
            }
        }
    }
    HitResult::None
}

// --- Truncation ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, true);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let (ew, _) = draw::measure(ellipsis, true);
    if ew >= max_width {
        return ellipsis.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, true);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

// --- Drawing ---

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let wx = wid.x();
    let wy = wid.y();
    let ww = wid.w();
    let wh = wid.h();
    let colors = st.colors;

    // Background
    draw::set_draw_color(colors.bar_bg);
    draw::draw_rectf(wx, wy, ww, wh);

    for item in &st.layout {
        match item {
            LayoutItem::Tab { index, x, width } => {
                let tx = wx + *x;
                let tab_width = *width;
                let tab = &st.tabs[*index];

                if tab.is_active {
                    draw_rounded_top_rect(tx, wy, tab_width, wh, CORNER_RADIUS, colors.active_bg);
                } else {
                    draw_rounded_top_rect(
                        tx,
                        wy + 2,
                        tab_width,
                        wh - 2,
                        CORNER_RADIUS,
                        colors.inactive_bg,
                    );
                }

                let text_color = if tab.is_active {
                    colors.active_text
                } else {
                    colors.inactive_text
                };

                let label = if tab.is_dirty {
                    format!("\u{25cf} {}", tab.display_name)
                } else {
                    tab.display_name.clone()
                };

                let text_area_width =
                    tab_width - TAB_H_PADDING - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE - TAB_H_PADDING;
                let display_text = truncate_to_fit(&label, text_area_width);

                draw::set_draw_color(text_color);
                draw::set_font(Font::Helvetica, 12);
                let text_x = tx + TAB_H_PADDING;
                let text_y = wy + (wh + 12) / 2;
                draw::draw_text(&display_text, text_x, text_y);

                // Close button
                let close_x = tx + tab_width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
                let close_y = wy + (wh - CLOSE_BTN_SIZE) / 2;
                let close_hovered = st.hover_tab_index == Some(*index) && st.hover_close;
                if close_hovered {
                    draw::set_draw_color(colors.close_hover_bg);
                    draw::draw_rectf(close_x, close_y, CLOSE_BTN_SIZE, CLOSE_BTN_SIZE);
                }
                draw::set_draw_color(text_color);
                draw::set_font(Font::Helvetica, 12);
                draw::draw_text(
                    "\u{00d7}",
                    close_x + CLOSE_BTN_SIZE / 2 - 3,
                    close_y + CLOSE_BTN_SIZE - 3,
                );
            }
            LayoutItem::PlusButton { x } => {
                let px = wx + *x;
                let py = wy + (wh - PLUS_BTN_WIDTH.min(wh - 4)) / 2;
                let pw = PLUS_BTN_WIDTH;
                let ph = PLUS_BTN_WIDTH.min(wh - 4);
                if st.hover_plus {
                    draw::set_draw_color(colors.inactive_bg);
                    draw::draw_rectf(px, py, pw, ph);
                }
                draw::set_draw_color(colors.inactive_text);
                draw::set_font(Font::Helvetica, 16);
                draw::draw_text("+", px + pw / 2 - 4, wy + (wh + 12) / 2);
            }
        }
    }
}

// --- Event handling ---

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            // Arm the widget so the matching Released arrives; the action
            // itself fires on release.
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            hit_test_layout(&st.layout, wid.y(), mx, my) != HitResult::None
        }
        Event::Released => {
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let button = fltk::app::event_button();
            let sender = st.sender;

            match hit_test_layout(&st.layout, wid.y(), mx, my) {
                // The sentinel creates a document no matter which button or
                // modifier was involved.
                HitResult::PlusButton => {
                    drop(st);
                    sender.send(Message::FileNew);
                    true
                }
                HitResult::Tab { index, is_close } => {
                    drop(st);
                    if button == 2 || is_close {
                        sender.send(Message::TabClose(index));
                    } else if button == 1 {
                        sender.send(Message::TabActivate(index));
                    }
                    true
                }
                HitResult::None => false,
            }
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();

            let (new_hover, new_close, new_plus) =
                match hit_test_layout(&st.layout, wid.y(), mx, my) {
                    HitResult::Tab { index, is_close } => (Some(index), is_close, false),
                    HitResult::PlusButton => (None, false, true),
                    HitResult::None => (None, false, false),
                };

            if new_hover != st.hover_tab_index
                || new_close != st.hover_close
                || new_plus != st.hover_plus
            {
                st.hover_tab_index = new_hover;
                st.hover_close = new_close;
                st.hover_plus = new_plus;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab_index.is_some() || st.hover_close || st.hover_plus {
                st.hover_tab_index = None;
                st.hover_close = false;
                st.hover_plus = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        _ => false,
    }
}
