use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod help_overlay;
pub mod status_bar;
pub mod widget_host;

pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
pub use widget_host::{PlaceholderRenderer, WidgetHost, WidgetRenderer, WidgetStatus};

pub use crate::component_context::ComponentContext;

/// A piece of the editor screen.
///
/// `handle_event` returns `true` when the component consumed the event;
/// components that only draw keep the default.
pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}
