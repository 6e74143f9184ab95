use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserialize, Deserializer};

/// Theme applied when no persisted choice exists.
pub const DEFAULT_THEME: &str = "atom_one";

/// Fixed built-in catalog, in display order. On a name collision with a
/// file in the theme directory, the built-in wins.
pub const BUILTIN_THEMES: [&str; 11] = [
    "atom_one",
    "one_dark",
    "monokai",
    "nord",
    "dracula",
    "github_light",
    "github_dark",
    "catppuccin_latte",
    "catppuccin_frappe",
    "catppuccin_macchiato",
    "catppuccin_mocha",
];

/// One RGB color, written as "#rrggbb" in theme files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).ok_or_else(|| de::Error::custom(format!("invalid color '{}'", s)))
    }
}

/// Parse "#rrggbb" into an Rgb. Returns None for anything else.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb(r, g, b))
}

/// A complete set of widget colors. Applying a palette is wholesale:
/// the previous one is reset first, never layered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ThemePalette {
    pub window_bg: Rgb,
    pub menu_bg: Rgb,
    pub menu_fg: Rgb,
    pub editor_bg: Rgb,
    pub editor_fg: Rgb,
    pub cursor: Rgb,
    pub selection: Rgb,
}

const fn palette(
    window_bg: Rgb,
    menu_bg: Rgb,
    menu_fg: Rgb,
    editor_bg: Rgb,
    editor_fg: Rgb,
    cursor: Rgb,
    selection: Rgb,
) -> ThemePalette {
    ThemePalette {
        window_bg,
        menu_bg,
        menu_fg,
        editor_bg,
        editor_fg,
        cursor,
        selection,
    }
}

/// The palette widgets carry before any theme is applied. Resetting to this
/// is what "unstyled" means.
pub const UNSTYLED: ThemePalette = palette(
    Rgb(240, 240, 240),
    Rgb(240, 240, 240),
    Rgb(0, 0, 0),
    Rgb(255, 255, 255),
    Rgb(0, 0, 0),
    Rgb(0, 0, 0),
    Rgb(173, 216, 230),
);

/// Look up a built-in palette by name.
pub fn builtin_palette(name: &str) -> Option<ThemePalette> {
    let p = match name {
        "atom_one" => palette(
            Rgb(250, 250, 250),
            Rgb(234, 234, 235),
            Rgb(56, 58, 66),
            Rgb(250, 250, 250),
            Rgb(56, 58, 66),
            Rgb(82, 109, 255),
            Rgb(229, 229, 230),
        ),
        "one_dark" => palette(
            Rgb(33, 37, 43),
            Rgb(40, 44, 52),
            Rgb(171, 178, 191),
            Rgb(40, 44, 52),
            Rgb(171, 178, 191),
            Rgb(82, 139, 255),
            Rgb(62, 68, 81),
        ),
        "monokai" => palette(
            Rgb(30, 31, 28),
            Rgb(39, 40, 34),
            Rgb(248, 248, 242),
            Rgb(39, 40, 34),
            Rgb(248, 248, 242),
            Rgb(253, 151, 31),
            Rgb(73, 72, 62),
        ),
        "nord" => palette(
            Rgb(46, 52, 64),
            Rgb(59, 66, 82),
            Rgb(216, 222, 233),
            Rgb(46, 52, 64),
            Rgb(216, 222, 233),
            Rgb(136, 192, 208),
            Rgb(67, 76, 94),
        ),
        "dracula" => palette(
            Rgb(33, 34, 44),
            Rgb(40, 42, 54),
            Rgb(248, 248, 242),
            Rgb(40, 42, 54),
            Rgb(248, 248, 242),
            Rgb(189, 147, 249),
            Rgb(68, 71, 90),
        ),
        "github_light" => palette(
            Rgb(246, 248, 250),
            Rgb(246, 248, 250),
            Rgb(36, 41, 47),
            Rgb(255, 255, 255),
            Rgb(36, 41, 47),
            Rgb(9, 105, 218),
            Rgb(221, 244, 255),
        ),
        "github_dark" => palette(
            Rgb(1, 4, 9),
            Rgb(13, 17, 23),
            Rgb(230, 237, 243),
            Rgb(13, 17, 23),
            Rgb(230, 237, 243),
            Rgb(47, 129, 247),
            Rgb(33, 66, 131),
        ),
        "catppuccin_latte" => palette(
            Rgb(230, 233, 239),
            Rgb(239, 241, 245),
            Rgb(76, 79, 105),
            Rgb(239, 241, 245),
            Rgb(76, 79, 105),
            Rgb(220, 138, 120),
            Rgb(204, 208, 218),
        ),
        "catppuccin_frappe" => palette(
            Rgb(41, 44, 60),
            Rgb(48, 52, 70),
            Rgb(198, 208, 245),
            Rgb(48, 52, 70),
            Rgb(198, 208, 245),
            Rgb(242, 213, 207),
            Rgb(65, 69, 89),
        ),
        "catppuccin_macchiato" => palette(
            Rgb(30, 32, 48),
            Rgb(36, 39, 58),
            Rgb(202, 211, 245),
            Rgb(36, 39, 58),
            Rgb(202, 211, 245),
            Rgb(244, 219, 214),
            Rgb(54, 58, 79),
        ),
        "catppuccin_mocha" => palette(
            Rgb(24, 24, 37),
            Rgb(30, 30, 46),
            Rgb(205, 214, 244),
            Rgb(30, 30, 46),
            Rgb(205, 214, 244),
            Rgb(245, 224, 220),
            Rgb(49, 50, 68),
        ),
        _ => return None,
    };
    Some(p)
}

/// Enumerates and resolves named themes: the built-in catalog plus any
/// `*.json` palette found in the theme directory.
pub struct ThemeStore {
    theme_dir: PathBuf,
}

impl ThemeStore {
    pub fn new(theme_dir: PathBuf) -> Self {
        Self { theme_dir }
    }

    /// All selectable theme names: built-ins first in catalog order, then
    /// file-based themes by filename (stem), de-duplicated.
    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_THEMES.iter().map(|s| s.to_string()).collect();

        let mut file_names: Vec<String> = match fs::read_dir(&self.theme_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
                .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
                .collect(),
            Err(_) => Vec::new(),
        };
        file_names.sort();

        for name in file_names {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Resolve a theme name to a palette. Disk file first; an absent or
    /// unreadable file falls back to the built-in of the same name; both
    /// missing yields None (the UI stays unstyled).
    pub fn resolve(&self, name: &str) -> Option<ThemePalette> {
        if let Some(p) = self.load_palette_file(name) {
            return Some(p);
        }
        builtin_palette(name)
    }

    fn load_palette_file(&self, name: &str) -> Option<ThemePalette> {
        let path = self.theme_dir.join(format!("{}.json", name));
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("Ignoring theme file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn theme_dir(&self) -> &Path {
        &self.theme_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn palette_json(editor_bg: &str) -> String {
        format!(
            r##"{{
                "window_bg": "#101010",
                "menu_bg": "#202020",
                "menu_fg": "#d0d0d0",
                "editor_bg": "{}",
                "editor_fg": "#e0e0e0",
                "cursor": "#ffffff",
                "selection": "#404060"
            }}"##,
            editor_bg
        )
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#000000"), Some(Rgb(0, 0, 0)));
        assert_eq!(parse_hex_color("#ff8001"), Some(Rgb(255, 128, 1)));
        assert_eq!(parse_hex_color("ff8001"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn test_default_theme_is_builtin() {
        assert!(BUILTIN_THEMES.contains(&DEFAULT_THEME));
        assert!(builtin_palette(DEFAULT_THEME).is_some());
    }

    #[test]
    fn test_every_catalog_entry_has_a_palette() {
        for name in BUILTIN_THEMES {
            assert!(builtin_palette(name).is_some(), "missing palette: {}", name);
        }
    }

    #[test]
    fn test_unknown_theme_resolves_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().to_path_buf());
        assert!(store.resolve("no_such_theme").is_none());
    }

    #[test]
    fn test_list_includes_file_themes_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("custom.json"), palette_json("#123456")).unwrap();
        // Collides with a built-in name; must not be listed twice.
        fs::write(dir.path().join("nord.json"), palette_json("#123456")).unwrap();
        fs::write(dir.path().join("ignore.txt"), "not a theme").unwrap();

        let store = ThemeStore::new(dir.path().to_path_buf());
        let themes = store.list_themes();

        assert_eq!(themes.iter().filter(|t| *t == "nord").count(), 1);
        assert!(themes.contains(&"custom".to_string()));
        assert!(!themes.iter().any(|t| t.contains("ignore")));
        // Built-ins keep catalog order at the front.
        assert_eq!(themes[0], "atom_one");
    }

    #[test]
    fn test_resolve_prefers_disk_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("nord.json"), palette_json("#123456")).unwrap();

        let store = ThemeStore::new(dir.path().to_path_buf());
        let p = store.resolve("nord").unwrap();
        assert_eq!(p.editor_bg, Rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = fs::File::create(dir.path().join("nord.json")).unwrap();
        writeln!(f, "{{ definitely not a palette").unwrap();

        let store = ThemeStore::new(dir.path().to_path_buf());
        let p = store.resolve("nord").unwrap();
        assert_eq!(p, builtin_palette("nord").unwrap());
    }

    #[test]
    fn test_missing_theme_dir_lists_builtins() {
        let store = ThemeStore::new(PathBuf::from("/definitely/not/here"));
        let themes = store.list_themes();
        assert_eq!(themes.len(), BUILTIN_THEMES.len());
    }
}
