use std::io;
use std::time::{Duration, Instant};

use crate::app::DashboardApp;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::persistence::StorageBackend;

/// Drive `app` until it asks to quit.
///
/// Every pass through the loop flushes due debounced writes, routes the
/// event (if any) and redraws. Pending writes are flushed and the terminal
/// is restored even when the loop fails.
pub fn run_dashboard<S, I, O>(
    app: &mut DashboardApp<S>,
    input: I,
    output: &mut O,
    poll_interval: Duration,
) -> io::Result<()>
where
    S: StorageBackend,
    I: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(input, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| {
        app.tick(Instant::now());
        if let Some(event) = event
            && app.handle_event(&event) == ControlFlow::Quit
        {
            return Ok(ControlFlow::Quit);
        }
        output.draw(|mut frame| app.render(&mut frame))?;
        Ok(ControlFlow::Continue)
    });

    app.shutdown();
    if let Err(err) = event_loop.driver().set_mouse_capture(false) {
        tracing::warn!(error = %err, "failed to release mouse capture");
    }
    output.exit()?;
    result
}
