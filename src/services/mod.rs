pub mod render_service;

pub use render_service::{RenderOutput, RenderService, SnapshotStatus, SnapshotSummary, TopEntry};
