//! # Event Bus Module
//!
//! Change notifications emitted by a [`MapDocument`](crate::MapDocument).
//!
//! ## Overview
//!
//! Every mutation that goes through the document's setters publishes a
//! [`DocumentEvent`] so dependent views (property grids, canvases) can refresh:
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter by category and receive events synchronously
//! - An optional bounded history keeps recent events for inspection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tilekit_core::event_bus::{DocumentEvent, EventCategory, EventFilter, TilesetEvent};
//!
//! let subscription = document.event_bus().subscribe(
//!     EventFilter::Categories(vec![EventCategory::Tileset]),
//!     |event| {
//!         if let DocumentEvent::Tileset(TilesetEvent::NameChanged { id }) = event {
//!             println!("tileset {} renamed", id);
//!         }
//!     },
//! );
//!
//! document.event_bus().unsubscribe(subscription);
//!
//! // or let a guard unsubscribe when it goes out of scope
//! let _guard = document.event_bus().subscribe_scoped(EventFilter::All, |_| {});
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
