use crate::{error::Error, outcome::Outcome};
use futures_util::{
    future::{self, CatchUnwind, Map, Ready},
    FutureExt,
};
use std::{future::Future, panic::AssertUnwindSafe, thread};

/// Marker for callables that return a `Result` directly.
pub struct Immediate;

/// Marker for callables that return a future resolving to a `Result`.
pub struct Deferred;

/// Turns whatever a callable returned into a future of `Outcome`.
///
/// `M` only exists to keep the `Result` and `Future` implementations apart,
/// it is inferred at the call site and never named by users.
pub trait Settle<M> {
    /// Value carried by a successful outcome.
    type Value;

    type Future: Future<Output = Outcome<Self::Value>>;

    fn settle(self) -> Self::Future;
}

/// Already settled, the outcome is ready on first poll.
impl<T, E> Settle<Immediate> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    type Value = T;
    type Future = Ready<Outcome<T>>;

    fn settle(self) -> Self::Future {
        future::ready(into_outcome(self))
    }
}

type Settled<Fut, T, E> =
    Map<CatchUnwind<AssertUnwindSafe<Fut>>, fn(thread::Result<Result<T, E>>) -> Outcome<T>>;

/// Settles once `Fut` does. A panic raised while polling `Fut` becomes a
/// failed outcome as well.
impl<Fut, T, E> Settle<Deferred> for Fut
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    type Value = T;
    type Future = Settled<Fut, T, E>;

    fn settle(self) -> Self::Future {
        AssertUnwindSafe(self)
            .catch_unwind()
            .map(caught_into_outcome as fn(_) -> _)
    }
}

fn into_outcome<T, E>(returned: Result<T, E>) -> Outcome<T>
where
    E: Into<anyhow::Error>,
{
    returned.map_err(Error::normalize).into()
}

fn caught_into_outcome<T, E>(caught: thread::Result<Result<T, E>>) -> Outcome<T>
where
    E: Into<anyhow::Error>,
{
    match caught {
        Ok(returned) => into_outcome(returned),
        Err(payload) => Outcome::failure(Error::from_panic(payload)),
    }
}
