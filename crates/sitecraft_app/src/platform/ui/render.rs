use std::path::{Path, PathBuf};

use sitecraft_core::{AppViewModel, MessageId, MessageRowView, MessageStatus, PreviewView, Sender};
use sitecraft_engine::{render_preview_page, write_page, PersistError, PreviewBounds, PreviewPage};

pub fn preview_page(view: &PreviewView) -> PreviewPage<'_> {
    match view {
        PreviewView::Placeholder => PreviewPage::Placeholder,
        PreviewView::Generating => PreviewPage::Generating,
        PreviewView::Failed { detail } => PreviewPage::Failed { detail },
        PreviewView::Document {
            html,
            device_mode,
            viewport,
        } => PreviewPage::Document {
            html,
            label: device_mode.label(),
            bounds: PreviewBounds {
                max_width: viewport.max_width,
                max_height: viewport.max_height,
            },
        },
    }
}

pub fn format_row(position: usize, row: &MessageRowView) -> String {
    let who = match row.sender {
        Sender::User => "you",
        Sender::Ai => "ai",
    };
    let status = match row.status {
        MessageStatus::Sending => " ...",
        MessageStatus::Sent => "",
        MessageStatus::Error if row.sender == Sender::User => " [error sending message]",
        MessageStatus::Error => " [error]",
    };
    let copied = if row.copied { " (copied)" } else { "" };
    format!(
        "[{position}] {} {who}: {}{status}{copied}",
        row.time_label, row.text
    )
}

pub fn format_transcript(view: &AppViewModel) -> String {
    if view.messages.is_empty() {
        return "(no messages yet)".to_string();
    }
    view.messages
        .iter()
        .enumerate()
        .map(|(i, row)| format_row(i + 1, row))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_status(view: &AppViewModel) -> String {
    let mut status = format!("device: {}", view.device_mode.label());
    if view.is_generating {
        status.push_str(" | generating… (input disabled, /cancel to abandon)");
    }
    if view.can_download {
        status.push_str(" | /download available");
    }
    status
}

/// Turns successive view models into incremental terminal output.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    shown: Vec<(MessageId, MessageStatus, bool)>,
    last_status: Option<String>,
}

impl TerminalRenderer {
    /// Lines to print for what changed since the previous call.
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, row) in view.messages.iter().enumerate() {
            let snapshot = (row.id.clone(), row.status, row.copied);
            match self.shown.get(i) {
                Some(previous) if *previous == snapshot => {}
                Some(previous) => {
                    // Only settle and copy transitions re-print; turning the indicator off is silent.
                    if previous.1 != row.status || (row.copied && !previous.2) {
                        lines.push(format_row(i + 1, row));
                    }
                    self.shown[i] = snapshot;
                }
                None => {
                    lines.push(format_row(i + 1, row));
                    self.shown.push(snapshot);
                }
            }
        }

        let status = format_status(view);
        if self.last_status.as_deref() != Some(status.as_str()) {
            lines.push(format!("-- {status}"));
            self.last_status = Some(status);
        }
        lines
    }
}

/// Keeps the preview page on disk in sync with the view.
#[derive(Debug)]
pub struct PreviewWriter {
    path: PathBuf,
    last_page: Option<String>,
}

impl PreviewWriter {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_page: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the page if it differs from the last one; returns whether it wrote.
    pub fn sync(&mut self, view: &PreviewView) -> Result<bool, PersistError> {
        let page = render_preview_page(&preview_page(view));
        if self.last_page.as_deref() == Some(page.as_str()) {
            return Ok(false);
        }
        write_page(&self.path, &page)?;
        self.last_page = Some(page);
        Ok(true)
    }
}
