//! Include/exclude filtering of hooks, programs and desktops
//!
//! The user's lists decide which entities the monitor reports:
//! - An include list, when present, restricts reporting to what it names
//! - An exclude list, when present, suppresses what it names
//! - With neither, everything is reported

mod filter_lists;

pub use filter_lists::{FilterLists, Verdict};
