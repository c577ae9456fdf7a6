//! The slice selector for selecting array ranges in JSONPath
use serde_json::Value;

use crate::spec::query::Queryable;

/// A slice selector, `[start:end:step]`
///
/// Each component is optional; a missing `step` defaults to `1`, and missing `start`/`end` are
/// filled in based on the sign of the step (see [`Queryable::query`] below).
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
pub struct Slice {
    /// The start of the slice, inclusive
    ///
    /// A negative value counts back from the end of the array being sliced.
    pub start: Option<isize>,
    /// The end of the slice, exclusive
    ///
    /// A negative value counts back from the end of the array being sliced.
    pub end: Option<isize>,
    /// The step of the slice
    ///
    /// A negative value steps in reverse order, from `start` down to `end`.
    pub step: Option<isize>,
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        write!(f, ":")?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        write!(f, ":")?;
        if let Some(step) = self.step {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[doc(hidden)]
impl Slice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: isize) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }
}

/// Normalize a possibly-negative slice bound against the array length, clamping into the
/// inclusive range the caller provides.
fn clamp(index: isize, len: isize, lo: isize, hi: isize) -> isize {
    let normalized = if index >= 0 { index } else { len + index };
    normalized.clamp(lo, hi)
}

impl Queryable for Slice {
    #[cfg_attr(feature = "trace", tracing::instrument(name = "Query Slice", level = "trace", parent = None, ret))]
    fn query<'b>(&self, current: &'b Value, _root: &'b Value) -> Vec<&'b Value> {
        let Some(list) = current.as_array() else {
            return vec![];
        };
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return vec![];
        }
        let Ok(len) = isize::try_from(list.len()) else {
            return vec![];
        };

        let mut out = Vec::new();
        if step > 0 {
            let lo = clamp(self.start.unwrap_or(0), len, 0, len);
            let hi = clamp(self.end.unwrap_or(len), len, 0, len);
            let mut i = lo;
            while i < hi {
                // `i` is in `[0, len)` by construction, so this index is always in range.
                out.push(&list[i as usize]);
                i += step;
            }
        } else {
            let lo = clamp(self.start.unwrap_or(len - 1), len, -1, len - 1);
            let hi = clamp(self.end.unwrap_or(-len - 1), len, -1, len - 1);
            let mut i = lo;
            while i > hi {
                out.push(&list[i as usize]);
                i += step;
            }
        }
        out
    }
}
