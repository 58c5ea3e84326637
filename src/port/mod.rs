//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   ┌──────────────┐     ┌───────────────────────┐     ┌──────────────┐
//!   │ HTTP adapter │ ──▶ │ fetch → normalize →   │ ──▶ │   Terminal   │
//!   │ (source)     │     │ filter → aggregate    │     │   renderer   │
//!   └──────────────┘     └───────────────────────┘     └──────────────┘
//! ```
//!
//! - [`PayloadSource`] - raw JSON GET against a reporting endpoint
//! - [`PageRenderer`] - draws a dashboard page

pub mod outbound;

pub use outbound::render::PageRenderer;
pub use outbound::source::PayloadSource;
