//! Customizable dashboard layout engine for RTI/MTSS monitoring.
//!
//! The core is UI-agnostic: [`layout`] holds the data model and the pure
//! geometry, validation and transfer utilities, [`persistence`] stores one
//! versioned layout, [`state`] is the reducer, and [`customization`] ties
//! them together behind one facade. The remaining modules build a terminal
//! editor on top.

pub mod actions;
pub mod app;
pub mod cli;
pub mod commands;
pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod customization;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod grid;
pub mod keybindings;
pub mod layout;
pub mod persistence;
pub mod registry;
pub mod runner;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod ui;

pub use actions::LayoutAction;
pub use customization::{CustomizationOptions, DashboardCustomizer};
pub use layout::{DashboardLayout, LayoutPatch, WidgetConfig};
pub use persistence::{FileStorage, LayoutPersistence, MemoryStorage, PersistenceError, StorageBackend};
pub use state::{DashboardState, LayoutStore};
