// Copyright 2026 the Accretion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and dump helpers for accretion diagnostics.
//!
//! This crate provides development-time views of
//! [`NodeRegistry`](accretion_core::layer::NodeRegistry) state:
//!
//! - [`pretty::PrettyPrintSink`] — a
//!   [`TraceSink`](accretion_core::trace::TraceSink) writing one
//!   human-readable line per registry event.
//! - [`dump::dump_registry`] — one line per live node, built on the core
//!   description helper.
//! - [`dump::registry_json`] — a machine-readable dump for tooling.

pub mod dump;
pub mod pretty;
