//! # glbind Fixture
//!
//! Bindings generated at build time from `fixtures/mini.xml` with the default
//! configuration: enum groups under [`gl`] and the [`Gl`] entry point table.
//! Any warning raised by the generated code fails the build.

#![deny(warnings)]

include!(concat!(env!("OUT_DIR"), "/enums.rs"));
include!(concat!(env!("OUT_DIR"), "/gl.rs"));
