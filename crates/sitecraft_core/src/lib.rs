//! SiteCraft core: pure chat-session state machine and view-model helpers.
mod device;
mod effect;
mod message;
mod msg;
mod preview;
mod state;
mod transcript;
mod update;
mod view_model;

pub use device::{DeviceMode, UnknownDeviceMode, Viewport};
pub use effect::Effect;
pub use message::{Message, MessageId, MessageStatus, Preview, PreviewKind, Sender};
pub use msg::Msg;
pub use preview::{select_preview, PreviewView, PREVIEW_FALLBACK_ERROR};
pub use state::{
    AppState, PendingRequest, RequestId, CANCELLED_ERROR, COPY_INDICATOR_TTL, FAILURE_TEXT,
    UNKNOWN_ERROR,
};
pub use transcript::Transcript;
pub use update::update;
pub use view_model::{AppViewModel, MessageRowView};
