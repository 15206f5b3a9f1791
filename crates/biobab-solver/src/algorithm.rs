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

use biobab_model::{oracle::ScalarizationOracle, pareto::ParetoSet};
use biobab_search::{
    context::SearchContext, error::SearchInterrupted, monitor::search_monitor::SearchMonitor,
};

/// A complete bi-objective search procedure.
///
/// Implementations record every integral point they meet into `frontier` and
/// return once the objective space has been exhausted. On interruption the
/// frontier holds everything found so far and the oracle carries none of the
/// algorithm's restrictions.
pub trait FrontierAlgorithm {
    /// The name reported to monitors.
    fn name(&self) -> &str;

    fn run<O, M>(
        &self,
        ctx: &mut SearchContext<'_, O, M>,
        frontier: &mut ParetoSet,
    ) -> Result<(), SearchInterrupted>
    where
        O: ScalarizationOracle + ?Sized,
        M: SearchMonitor + ?Sized;
}
