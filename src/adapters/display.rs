use crate::core::{CategoryFilter, DisplaySink, ExportArtifact, Notification, NotificationLevel, Quote};
use crate::utils::error::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Text rendering of the quote view, written line by line.
pub struct ConsoleDisplay<W: Write + Send = io::Stdout> {
    out: W,
    download_dir: PathBuf,
    active: Option<(Notification, Instant)>,
}

impl ConsoleDisplay<io::Stdout> {
    pub fn stdout(download_dir: impl Into<PathBuf>) -> Self {
        Self::new(io::stdout(), download_dir)
    }
}

impl<W: Write + Send> ConsoleDisplay<W> {
    pub fn new(out: W, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            out,
            download_dir: download_dir.into(),
            active: None,
        }
    }

    /// Most recent notification, until its ttl runs out.
    pub fn active_notification(&self) -> Option<&Notification> {
        self.active
            .as_ref()
            .filter(|(notification, shown_at)| shown_at.elapsed() < notification.ttl)
            .map(|(notification, _)| notification)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        // 終端輸出失敗時不中斷流程
        if let Err(e) = writeln!(self.out, "{}", line) {
            tracing::warn!("Failed to write to display: {}", e);
        }
    }
}

impl<W: Write + Send> DisplaySink for ConsoleDisplay<W> {
    fn render_quote(&mut self, quote: Option<&Quote>) {
        match quote {
            Some(quote) => {
                self.write_line(&format!("\"{}\"", quote.text));
                self.write_line(&format!("  Category: {}", quote.category));
            }
            None => self.write_line("No quotes available for this category."),
        }
    }

    fn render_categories(&mut self, categories: &[String], selected: &CategoryFilter) {
        let mut options = vec![crate::core::ALL_CATEGORIES.to_string()];
        options.extend(categories.iter().cloned());

        let rendered: Vec<String> = options
            .into_iter()
            .map(|option| {
                if option == selected.as_str() {
                    format!("[{}]", option)
                } else {
                    option
                }
            })
            .collect();
        self.write_line(&format!("Categories: {}", rendered.join(" ")));
    }

    fn notify(&mut self, notification: Notification) {
        let marker = match notification.level {
            NotificationLevel::Info => "ℹ️",
            NotificationLevel::Success => "✅",
            NotificationLevel::Error => "❌",
        };
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.write_line(&format!("{} [{}] {}", marker, stamp, notification.message));
        self.active = Some((notification, Instant::now()));
    }

    fn deliver(&mut self, artifact: &ExportArtifact) -> Result<()> {
        std::fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)?;

        tracing::info!("📁 Exported {} bytes to {}", artifact.bytes.len(), path.display());
        self.write_line(&format!("📁 Saved {}", path.display()));
        Ok(())
    }
}
