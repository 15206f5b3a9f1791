// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # BIOBAB Search
//!
//! The infrastructure shared by every bi-objective search algorithm:
//!
//! - `config`: `SearchConfig`, loaded from TOML or built in code.
//! - `error`: `SearchInterrupted`, the cooperative cancellation result.
//! - `monitor`: the `SearchMonitor` trait and its implementations.
//! - `stats`: `SearchStatistics`.
//! - `result`: `SearchOutcome` and `TerminationReason`.
//! - `context`: `SearchContext`, the gateway through which every oracle call passes.
//!
//! Searches are single-threaded. Cancellation is cooperative: monitors are
//! polled at the start of every node and before every oracle call, and a
//! termination request travels back up as `Err(SearchInterrupted)`.

pub mod config;
pub mod context;
pub mod error;
pub mod monitor;
pub mod result;
pub mod stats;
