use arboard::Clipboard;
use sitecraft_logging::site_error;

/// Plain-text clipboard access.
///
/// The `arboard` handle is opened on first use and then kept for the whole
/// session: on X11 and Wayland the copied text is served by the owning handle
/// and disappears once it is dropped.
#[derive(Default)]
pub struct ClipboardWriter {
    clipboard: Option<Clipboard>,
}

impl ClipboardWriter {
    pub fn copy(&mut self, text: &str) -> Result<(), String> {
        let opened = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().map_err(|err| {
                let message = format!("Failed to initialize clipboard: {err}");
                site_error!("{}", message);
                message
            })?,
        };
        let clipboard = self.clipboard.insert(opened);
        clipboard.set_text(text.to_owned()).map_err(|err| {
            let message = format!("Failed to set clipboard text: {err}");
            site_error!("{}", message);
            message
        })
    }

    #[cfg(test)]
    fn is_open(&self) -> bool {
        self.clipboard.is_some()
    }
}
