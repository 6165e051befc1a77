//! Shared crate-wide constants.

use std::time::Duration;

/// Storage slot holding the single active layout.
pub const STORAGE_KEY: &str = "dashboard_layout";

/// Schema version stamped on every stored layout.
///
/// A stored envelope carrying any other version is treated as absent data;
/// there is no migration path.
pub const CURRENT_VERSION: &str = "1.0.0";

/// Identifier of the built-in layout active before anything is loaded.
pub const EMPTY_LAYOUT_ID: &str = "default";

/// Display name of the built-in empty layout.
pub const EMPTY_LAYOUT_NAME: &str = "Layout Padrão";

/// Suffixes applied by `clone_layout`.
pub const CLONE_ID_SUFFIX: &str = "_clone";
pub const CLONE_NAME_SUFFIX: &str = " (Cópia)";

/// Number of grid columns on the dashboard.
pub const GRID_COLUMNS: u16 = 12;

/// Terminal rows drawn per grid row.
///
/// Units: terminal rows. Grid rows are much shorter than columns are wide
/// on a typical terminal, so two rows per grid unit keeps widgets roughly
/// proportional to their declared size.
pub const ROW_HEIGHT: u16 = 2;

/// Delay before a layout change is written to storage.
///
/// Rapid successive changes (a pointer drag emits one per cell crossed)
/// coalesce into a single trailing write; every new change restarts the
/// timer.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Directory used by the file storage backend when none is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".rti-dash";

/// Input poll interval for the terminal editor.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
