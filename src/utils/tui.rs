use std::future::Future;
use std::time::Duration;

use bday_core::BackendKind;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Await `fut`, showing a spinner while a remote call is in flight.
/// Local reads are instant, so they get no spinner.
pub async fn spin<F, T>(kind: BackendKind, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    if kind != BackendKind::Remote {
        return fut.await;
    }

    let spinner = create_spinner(message.to_string());
    let out = fut.await;
    spinner.finish_and_clear();
    out
}
