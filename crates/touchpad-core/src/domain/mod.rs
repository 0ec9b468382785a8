//! Domain entities for Touch Pad Server.
//!
//! # What is the "domain" layer? (for beginners)
//!
//! The domain layer holds the rules that would stay true no matter which OS
//! or network stack the server runs on.  Here that means desktop geometry:
//!
//! - **`geometry`** – [`Point`](geometry::Point) and
//!   [`ScreenRect`](geometry::ScreenRect), integer coordinates in the virtual
//!   desktop space.
//! - **`layout`** – the [`MonitorLayout`](layout::MonitorLayout): every
//!   monitor rectangle plus their union bounding box.
//! - **`correction`** – the [`BoundaryCorrector`](correction::BoundaryCorrector)
//!   that keeps relative cursor moves out of gaps in the layout.

pub mod correction;
pub mod geometry;
pub mod layout;
