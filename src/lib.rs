//! ==============================================================================
//! chas-devtools - helpers for manual control-unit / sensor-unit testing
//! ==============================================================================
//!
//! purpose:
//!     disposable tools used while developing the control-unit and sensor-unit
//!     firmware. none of this runs in production.
//!
//! contents:
//!     - control_unit.rs: stub backend that accepts payloads and shows the latest one
//!     - sensor_unit.rs:  stub control unit answering /connect and /time
//!     - token.rs:        hs256 tokens for control units
//!
//! ```text
//!     ┌────────────────────┐  POST /post   ┌──────────────────────────────┐
//!     │ control unit (fw)  │ ────────────▶ │ control_unit stub            │
//!     └────────────────────┘               │  store (latest payload)      │
//!               ▲                          │  render (html at /)          │
//!               │ /connect, /time          └──────────────────────────────┘
//!     ┌─────────┴──────────┐
//!     │ sensor unit (fw)   │ ◀── sensor_unit stub stands in for the control unit
//!     └────────────────────┘
//!
//! ```
//! ==============================================================================

pub mod config;
pub mod control_unit;
pub mod domain;
pub mod error;
pub mod render;
pub mod sensor_unit;
pub mod server;
pub mod store;
pub mod token;

pub use error::{Error, Result};
