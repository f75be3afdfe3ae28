//! Configuration-callback protocol.
//!
//! Builder operations take a closure and run it against a freshly created or
//! looked-up definition before they return. There is no queuing and no
//! deferred execution: by the time `row_with`, `group`, `page`, ... return,
//! the closure has finished and its effects are visible.
//!
//! A closure may return `()` or `XlsxDslResult<()>`. The second form lets a
//! callback use `?` on nested builder calls:
//!
//! ```ignore
//! sheet.group(|s| -> XlsxDslResult {
//!     s.row_at(3, |r| { r.cell("three"); })?;
//!     Ok(())
//! })?;
//! ```

use crate::error::XlsxDslResult;

/// Return type accepted from a configuration callback.
pub trait ConfigureOutcome {
    /// Normalize the callback outcome into a result.
    fn into_outcome(self) -> XlsxDslResult<()>;
}

impl ConfigureOutcome for () {
    fn into_outcome(self) -> XlsxDslResult<()> {
        Ok(())
    }
}

impl ConfigureOutcome for XlsxDslResult<()> {
    fn into_outcome(self) -> XlsxDslResult<()> {
        self
    }
}

/// Run `configure` against `target` and normalize its outcome.
pub(crate) fn run_configure<T, F, R>(target: &mut T, configure: F) -> XlsxDslResult<()>
where
    T: ?Sized,
    F: FnOnce(&mut T) -> R,
    R: ConfigureOutcome,
{
    configure(target).into_outcome()
}
