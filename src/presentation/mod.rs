pub mod outlined_label;
pub mod review_overlay;

pub use review_overlay::{ReviewAction, ReviewAftermath, ReviewOverlay, ReviewOverlayMessage};
