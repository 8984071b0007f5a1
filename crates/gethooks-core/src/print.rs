//! Human-readable dumps of list stores
//!
//! Printing never mutates and never fails except on I/O. Passing `None`
//! prints nothing.

use std::io::{self, Write};

use crate::list::{ListItem, ListKind, ListStore};

const SEP_WIDTH: usize = 60;

fn sep_begin(out: &mut dyn Write, fill: char, objname: &str) -> io::Result<()> {
    writeln!(out, "{}", banner(fill, &format!(" {objname} begin ")))
}

fn sep_end(out: &mut dyn Write, fill: char, objname: &str) -> io::Result<()> {
    writeln!(out, "{}", banner(fill, &format!(" {objname} end ")))
}

fn banner(fill: char, title: &str) -> String {
    let pad = SEP_WIDTH.saturating_sub(title.chars().count());
    let left = pad / 2;
    let mut line = String::with_capacity(SEP_WIDTH + 4);
    line.extend(std::iter::repeat(fill).take(left));
    line.push_str(title);
    line.extend(std::iter::repeat(fill).take(pad - left));
    line
}

/// Renders one item while a store is printed
pub trait ItemRenderer {
    /// Write `item`, which belongs to a store of `kind`
    fn render(&self, out: &mut dyn Write, kind: ListKind, item: &ListItem) -> io::Result<()>;
}

/// Per-kind rendering: hooks show id and name, programs show name or pid
#[derive(Debug, Clone, Copy, Default)]
pub struct KindRenderer;

impl ItemRenderer for KindRenderer {
    fn render(&self, out: &mut dyn Write, kind: ListKind, item: &ListItem) -> io::Result<()> {
        match (kind, item.name()) {
            (ListKind::IncludeHook | ListKind::ExcludeHook, Some(name)) => {
                writeln!(out, "hook: {} ({name})", item.id())
            }
            (ListKind::IncludeHook | ListKind::ExcludeHook, None) => {
                writeln!(out, "hook: {} (unknown name)", item.id())
            }
            (ListKind::IncludeProgram | ListKind::ExcludeProgram, Some(name)) => {
                writeln!(out, "program name: {name}")
            }
            (ListKind::IncludeProgram | ListKind::ExcludeProgram, None) => {
                writeln!(out, "program id: {}", item.id())
            }
            (ListKind::IncludeDesktop, _) => writeln!(out, "desktop: {item}"),
            (ListKind::Invalid, _) => print_list_item(out, Some(item)),
        }
    }
}

/// Print an item: its name if it has one, otherwise its id
pub fn print_list_item(out: &mut dyn Write, item: Option<&ListItem>) -> io::Result<()> {
    const OBJNAME: &str = "Generic List Item";

    let Some(item) = item else {
        return Ok(());
    };

    sep_begin(out, '-', OBJNAME)?;
    match item.name() {
        Some(name) => writeln!(out, "item.name: {name}")?,
        None => writeln!(out, "item.id: {}", item.id())?,
    }
    sep_end(out, '-', OBJNAME)
}

/// Print a store header and every item in insertion order
pub fn print_list_store(
    out: &mut dyn Write,
    store: Option<&ListStore>,
    renderer: &dyn ItemRenderer,
) -> io::Result<()> {
    const OBJNAME: &str = "Generic List Store";

    let Some(store) = store else {
        return Ok(());
    };

    sep_begin(out, '=', OBJNAME)?;
    writeln!(
        out,
        "store.created_at: {}",
        store.created_at().format("%Y-%m-%d %H:%M:%S%.3f")
    )?;
    writeln!(out, "store.kind: {}", describe_kind(store.kind()))?;
    writeln!(out, "store.len: {}", store.len())?;

    for item in store {
        renderer.render(out, store.kind(), item)?;
    }

    sep_end(out, '=', OBJNAME)
}

/// Label and description of a kind
pub fn describe_kind(kind: ListKind) -> String {
    format!("{} ({})", kind.label(), kind.description())
}

/// Like [`describe_kind`], for a raw kind value that may be out of range
pub fn describe_raw_kind(raw: i32) -> String {
    match ListKind::try_from(raw) {
        Ok(kind) => describe_kind(kind),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_store(store: Option<&ListStore>) -> String {
        let mut out = Vec::new();
        print_list_store(&mut out, store, &KindRenderer).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_none_prints_nothing() {
        let mut out = Vec::new();
        print_list_item(&mut out, None).unwrap();
        assert!(out.is_empty());
        assert!(render_store(None).is_empty());
    }

    #[test]
    fn test_item_prints_name_or_id() {
        let mut store = ListStore::new(ListKind::ExcludeProgram);
        store.insert(None, Some("notepad.exe")).unwrap();
        store.insert(Some(1234), None).unwrap();

        let mut out = Vec::new();
        for item in &store {
            print_list_item(&mut out, Some(item)).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("item.name: notepad.exe"));
        assert!(text.contains("item.id: 1234"));
        assert_eq!(text.matches("Generic List Item begin").count(), 2);
    }

    #[test]
    fn test_store_prints_items_in_order() {
        let mut store = ListStore::new(ListKind::IncludeHook);
        store.insert(Some(13), None).unwrap();
        store.insert(Some(2), None).unwrap();
        store.insert(Some(500), None).unwrap();

        let text = render_store(Some(&store));
        assert!(text.contains("LIST_INCLUDE_HOOK (user-specified list of hooks to include.)"));

        let ll = text.find("hook: 13 (WH_KEYBOARD_LL)").unwrap();
        let kb = text.find("hook: 2 (WH_KEYBOARD)").unwrap();
        let unknown = text.find("hook: 500 (unknown name)").unwrap();
        assert!(ll < kb && kb < unknown);
        assert!(text.trim_end().ends_with(&banner('=', " Generic List Store end ")));
    }

    #[test]
    fn test_raw_kind_labels() {
        assert!(describe_raw_kind(1).starts_with("LIST_INCLUDE_DESKTOP"));
        assert_eq!(describe_raw_kind(77), "77 (unknown kind)");
    }

    #[test]
    fn test_banner_width() {
        assert_eq!(banner('-', " x ").chars().count(), SEP_WIDTH);
    }
}
