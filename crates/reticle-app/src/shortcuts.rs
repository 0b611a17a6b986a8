//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, description: &'static str) -> Self {
        Self { key, description }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("H", "Toggle hide default cursor"),
            Shortcut::new("P", "Toggle parallax effect"),
            Shortcut::new("1", "Cursor size: Small"),
            Shortcut::new("2", "Cursor size: Medium"),
            Shortcut::new("3", "Cursor size: Large"),
            Shortcut::new("C", "Cycle cursor color"),
            Shortcut::new("[", "Decrease spin duration"),
            Shortcut::new("]", "Increase spin duration"),
            Shortcut::new("?", "Show keyboard shortcuts"),
            Shortcut::new("Escape", "Close dialog"),
        ]
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:10} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}
