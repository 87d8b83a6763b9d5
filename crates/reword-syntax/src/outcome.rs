//! The success/failure vocabulary shared by every rule.
//!
//! `Result` already covers map, bind, error mapping and fallbacks
//! (`map`, `and_then`, `map_err`, `or_else`). [`OutcomeExt`] adds the two
//! combinators the rule engine leans on that `Result` lacks: folding both
//! branches into one value and zipping two outcomes.

use crate::diagnostic::Diagnostic;

/// Result of a lex or generate step.
pub type Outcome<T> = Result<T, Diagnostic>;

/// Extra combinators over `Result`.
pub trait OutcomeExt<T, E>: Sized {
    /// Fold both branches into a common type.
    fn fold<R>(self, when_ok: impl FnOnce(T) -> R, when_err: impl FnOnce(E) -> R) -> R;

    /// Pair this value with the outcome of `other`, left then right.
    ///
    /// `other` is only evaluated when `self` succeeded, so the first failure
    /// wins.
    fn pair_with<R>(self, other: impl FnOnce() -> Result<R, E>) -> Result<(T, R), E>;

    /// Keep `self` if it succeeded, otherwise evaluate `fallback`.
    fn or_try(self, fallback: impl FnOnce() -> Result<T, E>) -> Result<T, E>;
}

impl<T, E> OutcomeExt<T, E> for Result<T, E> {
    fn fold<R>(self, when_ok: impl FnOnce(T) -> R, when_err: impl FnOnce(E) -> R) -> R {
        match self {
            Ok(value) => when_ok(value),
            Err(error) => when_err(error),
        }
    }

    fn pair_with<R>(self, other: impl FnOnce() -> Result<R, E>) -> Result<(T, R), E> {
        let left = self?;
        let right = other()?;
        Ok((left, right))
    }

    fn or_try(self, fallback: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        match self {
            Ok(value) => Ok(value),
            Err(_) => fallback(),
        }
    }
}
