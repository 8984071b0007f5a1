//! Hook id/name directory
//!
//! A hook is identified by its numeric `WH_*` id; the name is an alias.
//! List stores consult a [`HookDirectory`] to move between the two.

/// Lookup between hook ids and their display names
#[cfg_attr(test, mockall::automock)]
pub trait HookDirectory {
    /// Resolve a hook name to its canonical id
    fn id_from_name(&self, name: &str) -> Option<i32>;

    /// Resolve a hook id to an owned display name
    fn name_from_id(&self, id: i32) -> Option<String>;
}

/// Documented Windows hook ids, as accepted by `SetWindowsHookEx`
const WINDOWS_HOOKS: &[(i32, &str)] = &[
    (-1, "WH_MSGFILTER"),
    (0, "WH_JOURNALRECORD"),
    (1, "WH_JOURNALPLAYBACK"),
    (2, "WH_KEYBOARD"),
    (3, "WH_GETMESSAGE"),
    (4, "WH_CALLWNDPROC"),
    (5, "WH_CBT"),
    (6, "WH_SYSMSGFILTER"),
    (7, "WH_MOUSE"),
    (8, "WH_HARDWARE"),
    (9, "WH_DEBUG"),
    (10, "WH_SHELL"),
    (11, "WH_FOREGROUNDIDLE"),
    (12, "WH_CALLWNDPROCRET"),
    (13, "WH_KEYBOARD_LL"),
    (14, "WH_MOUSE_LL"),
];

/// Built-in directory of the documented `WH_*` hooks
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsHookTable;

impl HookDirectory for WindowsHookTable {
    fn id_from_name(&self, name: &str) -> Option<i32> {
        let name = name.trim();
        WINDOWS_HOOKS
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    fn name_from_id(&self, id: i32) -> Option<String> {
        WINDOWS_HOOKS
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, name)| (*name).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let table = WindowsHookTable;
        assert_eq!(table.id_from_name("WH_KEYBOARD"), Some(2));
        assert_eq!(table.id_from_name("wh_keyboard_ll"), Some(13));
        assert_eq!(table.id_from_name(" WH_MSGFILTER "), Some(-1));
        assert_eq!(table.id_from_name("WH_UNKNOWN"), None);
    }

    #[test]
    fn test_id_lookup() {
        let table = WindowsHookTable;
        assert_eq!(table.name_from_id(7).as_deref(), Some("WH_MOUSE"));
        assert_eq!(table.name_from_id(14).as_deref(), Some("WH_MOUSE_LL"));
        assert_eq!(table.name_from_id(99), None);
    }

    #[test]
    fn test_table_ids_are_unique() {
        let mut ids: Vec<i32> = WINDOWS_HOOKS.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), WINDOWS_HOOKS.len());
    }
}
