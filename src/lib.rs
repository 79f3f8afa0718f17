//! Effect state and math for the showcase page.
//!
//! Everything here is plain data and arithmetic so it can be exercised
//! natively; the wasm frontend wires it to the DOM.

pub mod accordion;
pub mod config;
pub mod counter;
pub mod cursor;
pub mod frame;
pub mod motion;
pub mod reveal;
pub mod role;
pub mod theme;
