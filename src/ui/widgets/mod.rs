// src/ui/widgets/mod.rs

pub mod drop_zone; // Drop target and image preview summary.
pub mod footer; // Key hints for the current mode.
pub mod input; // Path input behind the file picker.
pub mod notification_popup; // Blocking notices.
pub mod results; // Loading spinner and the three result regions.
