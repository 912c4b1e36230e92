//! Panic hook that puts the terminal back before the panic message prints.

use super::setup::emergency_restore;
use std::panic;

/// Install after `color_eyre::install()` so its report still prints.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        tracing::error!(%panic_info, "panic");
        original_hook(panic_info);
    }));
}
