use crate::{DeviceMode, MessageId, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Generate {
        request_id: RequestId,
        prompt: String,
        device_mode: DeviceMode,
    },
    CancelGeneration { request_id: RequestId },
    CopyToClipboard { id: MessageId, text: String },
    DownloadPreview { html: String },
}
