use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.blue} [{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {pos}/{len} {msg}";

/// Bar currently drawn on stderr, if any
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Bar for the pairwise classification stage
///
/// The bar stays registered until `finish` so log lines can be printed
/// around it.
pub fn pair_progress(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let style = ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");

    bar.set_style(style);
    bar.set_message("pairs");
    bar.enable_steady_tick(Duration::from_millis(100));
    set_active(Some(bar.clone()));
    bar
}

/// Clear the bar and stop routing log output around it
pub fn finish(bar: &ProgressBar) {
    bar.finish_and_clear();
    set_active(None);
}

/// Progress callback feeding `bar`; safe to call from worker threads
pub fn progress_callback(bar: &ProgressBar) -> impl Fn(u64, u64) + Send + Sync + use<> {
    let bar = bar.clone();
    move |done, _total| bar.set_position(done)
}

/// Run `f` with the active bar hidden, or directly when there is none
pub fn suspend_active<R>(f: impl FnOnce() -> R) -> R {
    let bar = ACTIVE_BAR.lock().ok().and_then(|active| active.clone());
    match bar {
        Some(bar) => bar.suspend(f),
        None => f(),
    }
}

fn set_active(bar: Option<ProgressBar>) {
    if let Ok(mut active) = ACTIVE_BAR.lock() {
        *active = bar;
    }
}
