use crate::{callable::Callable, error::Error, invoke::tranqui, outcome::Outcome, settle::Settle};
use anyhow::Context;
use futures_util::future::{self, BoxFuture, FutureExt};
use log::{debug, trace};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, panic::AssertUnwindSafe};

type BoxedCallback = Box<dyn Fn(Value) -> BoxFuture<'static, Outcome<Value>> + Send + Sync>;

/// Single call described by untyped input, e.g. a JSON configuration.
///
/// ```json
/// { "callback": "double", "args": [5] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Name the callback was registered under.
    pub callback: String,

    /// Positional arguments, decoded into the callback's parameters.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Call {
    pub fn new(callback: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            callback: callback.into(),
            args,
        }
    }
}

/// Callbacks addressable by name.
///
/// This is where untyped input meets typed callables, so this is also where
/// invocability is checked at runtime: unknown names and arguments that do
/// not fit the callback's parameters produce an `Invalid function` failure
/// without calling anything.
///
/// ```rust
/// use futures_executor::block_on;
/// use serde_json::json;
/// use tranqui_core::{Error, Registry};
///
/// fn double(n: i32) -> Result<i32, Error> {
///     Ok(n * 2)
/// }
///
/// let registry = Registry::new().register("double", double);
///
/// let outcome = block_on(registry.invoke("double", json!([5])));
/// assert_eq!(outcome.value(), Some(&json!(10)));
///
/// let outcome = block_on(registry.invoke("triple", json!([5])));
/// assert_eq!(outcome.error().unwrap().message(), "Invalid function");
/// ```
#[derive(Default)]
pub struct Registry {
    callbacks: HashMap<String, BoxedCallback>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` under `name`, replacing any callback already there.
    ///
    /// Parameters are decoded from JSON and the settled value is encoded
    /// back, so `Args` has to be deserializable and the value serializable.
    pub fn register<N, F, Args, M>(mut self, name: N, f: F) -> Self
    where
        N: Into<String>,
        F: Callable<Args> + Clone + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        F::Output: Settle<M>,
        <F::Output as Settle<M>>::Value: Serialize + Send + 'static,
        <F::Output as Settle<M>>::Future: Send + 'static,
        M: 'static,
    {
        let name = name.into();
        trace!("Registry::register - {}", name);

        let callback = move |args: Value| -> BoxFuture<'static, Outcome<Value>> {
            let args = match decode_args::<Args>(args) {
                Ok(args) => args,
                Err(err) => return future::ready(Outcome::failure(err)).boxed(),
            };

            let encoded = tranqui(f.clone(), args).map(|outcome| outcome.and_then(encode_value));

            // Encoding runs user `Serialize` code after `tranqui` settled.
            AssertUnwindSafe(encoded)
                .catch_unwind()
                .map(|caught| {
                    caught.unwrap_or_else(|payload| Outcome::failure(Error::from_panic(payload)))
                })
                .boxed()
        };

        self.callbacks.insert(name, Box::new(callback));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Names of every registered callback, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.callbacks.keys().map(String::as_str)
    }

    /// Calls the callback registered under `name` with JSON `args`.
    ///
    /// `args` is an array of positional arguments. An empty array or `null`
    /// calls a callback without parameters. The callback runs before this
    /// returns, exactly as with `tranqui`.
    pub fn invoke(&self, name: &str, args: Value) -> BoxFuture<'static, Outcome<Value>> {
        match self.callbacks.get(name) {
            Some(callback) => callback(args),
            None => {
                debug!("Registry::invoke - no callback registered as {:?}", name);
                future::ready(Outcome::failure(Error::invalid_function())).boxed()
            }
        }
    }

    /// Runs a `Call` read from untyped input.
    pub fn dispatch(&self, call: &Call) -> BoxFuture<'static, Outcome<Value>> {
        self.invoke(&call.callback, Value::Array(call.args.clone()))
    }
}

/// Decodes positional JSON arguments into a parameter tuple.
fn decode_args<Args>(args: Value) -> Result<Args, Error>
where
    Args: DeserializeOwned,
{
    let args = match args {
        Value::Array(items) if items.is_empty() => Value::Null,
        other => other,
    };

    serde_json::from_value(args).map_err(|err| {
        debug!("Registry::invoke - arguments do not fit: {}", err);
        Error::invalid_function_from(err)
    })
}

fn encode_value<T>(value: T) -> Result<Value, Error>
where
    T: Serialize,
{
    serde_json::to_value(value)
        .context("could not encode settled value")
        .map_err(Error::normalize)
}
