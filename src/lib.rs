//! Core of the werkplek workspace designer.
//!
//! A headless model of a 2D office-layout canvas: furniture items are placed
//! from a catalog (or user-defined), moved by dragging, scaled, rotated,
//! recolored and priced, and the whole layout is persisted as a versioned
//! JSON snapshot. The host UI layer owns the DOM; it forwards input events to
//! [`workspace::Workspace`] and re-renders from the returned
//! [`workspace::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`workspace`] | Session object tying registry, drag, costs and storage together |
//! | [`registry`] | Ordered item store, id minting, selection and edits |
//! | [`item`] | Item record, ids, prices and photo references |
//! | [`catalog`] | Built-in item kinds and their defaults |
//! | [`geometry`] | Points, sizes, clamping and the scale/rotate transform |
//! | [`drag`] | Pointer drag state machine |
//! | [`cost`] | Per-label cost aggregation |
//! | [`layout`] | Snapshot serialization, restore and legacy migration |
//! | [`storage`] | Key-value storage seam |
//! | [`config`] | Environment-driven configuration |
//! | [`error`] | Error type and stable error codes |
//! | [`consts`] | Shared numeric and string constants |

pub mod catalog;
pub mod config;
pub mod consts;
pub mod cost;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod item;
pub mod layout;
pub mod registry;
pub mod storage;
pub mod workspace;

pub use error::{ErrorCode, LayoutError};
pub use workspace::{Action, Workspace};
