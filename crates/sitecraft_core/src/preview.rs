use crate::{DeviceMode, Transcript, Viewport};

pub const PREVIEW_FALLBACK_ERROR: &str = "Unknown error occurred";

/// What the preview pane should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewView {
    /// Empty transcript: call to action.
    Placeholder,
    /// First request still outstanding, nothing to show yet.
    Generating,
    Failed {
        detail: String,
    },
    Document {
        html: String,
        device_mode: DeviceMode,
        viewport: Viewport,
    },
}

/// Picks the active preview: the newest message carrying one.
pub fn select_preview(
    transcript: &Transcript,
    request_pending: bool,
    device_mode: DeviceMode,
) -> PreviewView {
    if transcript.is_empty() {
        return PreviewView::Placeholder;
    }

    let Some(preview) = transcript
        .active_preview_message()
        .and_then(|message| message.preview.as_ref())
    else {
        return if request_pending {
            PreviewView::Generating
        } else {
            PreviewView::Failed {
                detail: PREVIEW_FALLBACK_ERROR.to_string(),
            }
        };
    };

    if !preview.is_renderable() {
        let detail = preview
            .error
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| PREVIEW_FALLBACK_ERROR.to_string());
        return PreviewView::Failed { detail };
    }

    PreviewView::Document {
        html: preview.content.clone(),
        device_mode,
        viewport: device_mode.viewport(),
    }
}
