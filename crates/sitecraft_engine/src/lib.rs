//! SiteCraft engine: generation client, preview page rendering and file output.
mod engine;
mod filename;
mod generate;
mod persist;
mod preview;
mod types;

pub use engine::EngineHandle;
pub use filename::{download_filename, DOWNLOAD_PREFIX};
pub use generate::{
    GenerateSettings, Generator, ReqwestGenerator, DEFAULT_BASE_URL, GENERATE_PATH,
};
pub use persist::{ensure_output_dir, save_download, write_page, AtomicFileWriter, PersistError};
pub use preview::{escape_html, render_preview_page, PreviewBounds, PreviewPage, PREVIEW_SANDBOX};
pub use types::{
    DeviceMode, EngineError, EngineEvent, FailureKind, GenerateError, GenerateRequest, RequestId,
};
