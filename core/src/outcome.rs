use crate::error::Error;
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Result of a single call made through `tranqui`.
///
/// Holds either the value the call produced or the normalized `Error` it
/// failed with, never both. Fields are not exposed, use the accessors.
///
/// ```rust
/// use tranqui_core::{Error, Outcome};
///
/// let ok: Outcome<i32> = Outcome::success(10);
/// assert!(ok.is_ok());
/// assert_eq!(ok.value(), Some(&10));
///
/// let failed: Outcome<i32> = Outcome::failure(Error::msg("Negative not allowed"));
/// assert!(failed.has_error());
/// assert_eq!(failed.value(), None);
/// ```
#[derive(Debug)]
pub struct Outcome<T> {
    settled: Result<T, Error>,
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self { settled: Ok(value) }
    }

    pub fn failure(error: Error) -> Self {
        Self { settled: Err(error) }
    }

    /// Value produced by the call, `None` if it failed.
    pub fn value(&self) -> Option<&T> {
        self.settled.as_ref().ok()
    }

    /// Failure of the call, `None` if it succeeded.
    pub fn error(&self) -> Option<&Error> {
        self.settled.as_ref().err()
    }

    pub fn has_error(&self) -> bool {
        !self.is_ok()
    }

    /// True iff the call succeeded.
    pub fn is_ok(&self) -> bool {
        self.settled.is_ok()
    }

    pub fn into_result(self) -> Result<T, Error> {
        self.settled
    }

    pub fn into_value(self) -> Option<T> {
        self.settled.ok()
    }

    pub fn into_error(self) -> Option<Error> {
        self.settled.err()
    }

    /// Transforms the value of a successful outcome, failures pass through.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        Outcome {
            settled: self.settled.map(f),
        }
    }

    /// Chains a fallible step onto a successful outcome.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, Error>,
    {
        Outcome {
            settled: self.settled.and_then(f),
        }
    }
}

impl<T> From<Result<T, Error>> for Outcome<T> {
    fn from(settled: Result<T, Error>) -> Self {
        Self { settled }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.settled
    }
}

/// Serializes to `{"ok": bool, "value": T | null, "error": string | null}`.
impl<T> Serialize for Outcome<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Outcome", 3)?;
        state.serialize_field("ok", &self.is_ok())?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("error", &self.error())?;
        state.end()
    }
}
