use serde::{Serialize, Serializer};
use std::{
    any::Any,
    fmt::{self, Debug, Display},
};

/// Message carried by every failure the invocation guard produces.
pub const INVALID_FUNCTION: &str = "Invalid function";

/// Message used for panics whose payload is neither `&str` nor `String`.
pub const OPAQUE_PANIC: &str = "opaque panic payload";

/// Why a call did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The guard refused to call anything: unknown callback, or arguments
    /// that do not fit its parameters.
    InvalidFunction,

    /// The callable ran and failed: it returned `Err`, its future settled
    /// with `Err`, or it panicked.
    Execution,
}

/// Normalized failure of a single call.
///
/// Whatever the callable failed with ends up here, so a failed `Outcome`
/// is always inspected the same way. The original error stays reachable
/// through `downcast_ref`.
pub struct Error {
    kind: ErrorKind,
    inner: anyhow::Error,
}

impl Error {
    /// Creates an execution failure out of any displayable value.
    ///
    /// ```rust
    /// use tranqui_core::Error;
    ///
    /// let err = Error::msg("boom");
    /// assert_eq!(err.message(), "boom");
    /// ```
    pub fn msg<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self {
            kind: ErrorKind::Execution,
            inner: anyhow::Error::msg(message),
        }
    }

    /// Failure produced by the guard, without any further detail.
    pub fn invalid_function() -> Self {
        Self {
            kind: ErrorKind::InvalidFunction,
            inner: anyhow::Error::msg(INVALID_FUNCTION),
        }
    }

    /// Guard failure caused by `cause`. The message stays `Invalid function`,
    /// `cause` is kept below it in the chain.
    pub fn invalid_function_from<E>(cause: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            kind: ErrorKind::InvalidFunction,
            inner: cause.into().context(INVALID_FUNCTION),
        }
    }

    /// Normalizes an error value. An `Error` that went through `anyhow`
    /// comes back out unchanged, anything else is wrapped as an execution
    /// failure. Context added on top of an `Error` counts as anything else.
    pub fn normalize<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let mut err = err.into();

        // `downcast` sees through context layers, only unwrap a bare `Error`.
        let outermost_is_error = err
            .chain()
            .next()
            .and_then(|e| e.downcast_ref::<Error>())
            .is_some();

        if outermost_is_error {
            err = match err.downcast::<Error>() {
                Ok(err) => return err,
                Err(err) => err,
            };
        }

        Self {
            kind: ErrorKind::Execution,
            inner: err,
        }
    }

    /// Turns a panic payload into an execution failure using its string
    /// form.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<&'static str>() {
            Ok(s) => (*s).to_string(),
            Err(payload) => match payload.downcast::<String>() {
                Ok(s) => *s,
                Err(_) => OPAQUE_PANIC.to_string(),
            },
        };
        Self::msg(message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Top-level message, without the chain of causes.
    pub fn message(&self) -> String {
        self.inner.to_string()
    }

    /// Returns the original error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.inner.downcast_ref::<E>()
    }

    /// Iterates over this error and its causes, outermost first.
    pub fn chain(&self) -> anyhow::Chain<'_> {
        self.inner.chain()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}", self.inner)
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message())
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::normalize(err)
    }
}

/// Serialized as its message.
impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.message())
    }
}
