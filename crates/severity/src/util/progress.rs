use indicatif::{ProgressBar, ProgressStyle};

/// Tables at least this long get a progress bar.
pub const PROGRESS_THRESHOLD: usize = 10_000;

/// Progress bar for classifying `records` rows.
///
/// Small tables finish before a bar is useful. Verbose mode prints one line
/// per record and quiet mode prints nothing, so neither gets a bar.
pub fn classification_progress(records: usize, verbose: bool, quiet: bool) -> Option<ProgressBar> {
    if verbose || quiet || records < PROGRESS_THRESHOLD {
        return None;
    }

    let pb = ProgressBar::new(records as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} Classifying [{wide_bar:.cyan/blue}] {pos}/{len} records ({per_sec}, {eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    Some(pb)
}
