use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on the terminal while the workbook sheets are loaded
pub struct LoadProgress {
    spinner: Option<ProgressBar>,
    total_sheets: usize,
}

impl LoadProgress {
    pub fn new(total_sheets: usize, silent: bool) -> Self {
        if silent {
            return Self {
                spinner: None,
                total_sheets,
            };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Opening workbook...");
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            spinner: Some(pb),
            total_sheets,
        }
    }

    pub fn sheet_started(&self, index: usize, sheet: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(format!(
                "Loading sheet '{}' ({}/{})",
                sheet,
                index + 1,
                self.total_sheets
            ));
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.finish_with_message(message.to_string());
        }
    }
}

impl Drop for LoadProgress {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
