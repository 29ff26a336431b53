use std::future::Future;

use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Run `work` behind a spinner, clearing it however `work` ends.
pub async fn with_spinner<F, T>(message: &str, work: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = create_spinner(message.to_string());
    let result = work.await;
    spinner.finish_and_clear();
    result
}
