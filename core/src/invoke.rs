use crate::{callable::Callable, error::Error, outcome::Outcome, settle::Settle};
use futures_util::future::{self, Either, FutureExt};
use log::{debug, trace};
use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
};

/// Calls `f` with `args` and turns whatever happens into an `Outcome`.
///
/// `f` runs right away, before this function returns, so its synchronous
/// side effects are visible to the caller immediately. Only delivery of the
/// outcome goes through the returned future. That future always completes
/// with an `Outcome`: an `Err`, a failed future or a panic all end up as a
/// failed outcome carrying a normalized `Error`.
///
/// `f` may return a `Result<T, E>` or any future resolving to one, where
/// `E` converts into `anyhow::Error`. Infallible functions must return
/// `Ok(v)`, a plain `v` is not accepted.
///
/// ```rust
/// use futures_executor::block_on;
/// use tranqui_core::{tranqui, Error};
///
/// fn double(n: i32) -> Result<i32, Error> {
///     if n < 0 {
///         return Err(Error::msg("Negative not allowed"));
///     }
///     Ok(n * 2)
/// }
///
/// let outcome = block_on(tranqui(double, (5,)));
/// assert_eq!(outcome.value(), Some(&10));
///
/// let outcome = block_on(tranqui(double, (-5,)));
/// assert_eq!(outcome.error().unwrap().message(), "Negative not allowed");
///
/// let outcome = block_on(tranqui(|n: i32| Ok::<_, Error>(n * 3), (3,)));
/// assert_eq!(outcome.value(), Some(&9));
/// ```
pub fn tranqui<F, Args, M>(
    f: F,
    args: Args,
) -> impl Future<Output = Outcome<<F::Output as Settle<M>>::Value>>
where
    F: Callable<Args>,
    F::Output: Settle<M>,
{
    let settling = match panic::catch_unwind(AssertUnwindSafe(|| f.call(args))) {
        Ok(returned) => Either::Right(returned.settle()),
        Err(payload) => {
            let err = Error::from_panic(payload);
            debug!("tranqui - callable panicked: {}", err);
            Either::Left(future::ready(Outcome::failure(err)))
        }
    };

    settling.inspect(|outcome| match outcome.error() {
        Some(err) => debug!("tranqui - call failed: {:#}", err),
        None => trace!("tranqui - call succeeded"),
    })
}
