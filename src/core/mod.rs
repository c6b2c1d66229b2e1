//! Protocol-level types shared by the REST shim and its tests.

pub mod mcp;
