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

//! Cancellation by an external flag, e.g. one set from a signal handler or
//! another thread while a frontier is being enumerated.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use std::sync::atomic::{AtomicBool, Ordering};

const DEFAULT_REASON: &str = "Interrupt signal received";

/// Terminates the search once the shared stop flag reads `true`.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
    reason: String,
}

impl<'a> InterruptMonitor<'a> {
    #[inline]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self::with_reason(stop_flag, DEFAULT_REASON)
    }

    /// Reports `reason` as the termination reason instead of the default.
    #[inline]
    pub fn with_reason(stop_flag: &'a AtomicBool, reason: impl Into<String>) -> Self {
        Self {
            stop_flag,
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn is_raised(&self) -> bool {
        self.stop_flag.load(Ordering::Acquire)
    }
}

impl<'a> SearchMonitor for InterruptMonitor<'a> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _algorithm: &str) {}

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    fn search_command(&self) -> SearchCommand {
        if self.is_raised() {
            SearchCommand::Terminate(self.reason.clone())
        } else {
            SearchCommand::Continue
        }
    }
}
