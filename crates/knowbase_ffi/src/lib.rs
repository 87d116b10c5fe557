//! Flutter-facing bindings for the knowledge editor.

pub mod api;
