//! Key bindings for list views.
//!
//! A [`Binding`] ties one or more keys to an action plus the short help text
//! shown for it. Components group their bindings in a struct and implement
//! [`KeyMap`] so help views can list them.
//!
//! ```rust
//! use bubbletea_paged_list::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')]).with_help("→/l", "next page");
//! let msg = KeyMsg { key: KeyCode::Char('l'), modifiers: KeyModifiers::NONE };
//! assert!(next.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"→/l"`.
    pub key: String,
    /// Action, e.g. `"next page"`.
    pub desc: String,
}

/// A set of keys bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    modifiers: KeyModifiers,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for `keys` with no modifiers.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            modifiers: KeyModifiers::NONE,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Requires `modifiers` to be held, e.g. `KeyModifiers::CONTROL`.
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match and
    /// are left out of help.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true unless the binding was disabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The bound keys.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// The help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true if `msg` triggers this binding.
    ///
    /// Shift is ignored for character keys, since terminals report it for
    /// upper-case letters and symbols.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() || !self.keys.contains(&msg.key) {
            return false;
        }
        let held = if matches!(msg.key, KeyCode::Char(_)) {
            msg.modifiers.difference(KeyModifiers::SHIFT)
        } else {
            msg.modifiers
        };
        held == self.modifiers
    }
}

/// Bindings of a component, grouped for help views.
pub trait KeyMap {
    /// Bindings shown in the one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings shown in the expanded help, one inner vector per column.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Renders enabled bindings as `key desc • key desc`.
pub fn short_help_line<K: KeyMap + ?Sized>(keymap: &K) -> String {
    keymap
        .short_help()
        .into_iter()
        .filter(|b| b.enabled())
        .map(|b| format!("{} {}", b.help.key, b.help.desc))
        .collect::<Vec<_>>()
        .join(" • ")
}
