use anyhow::Context;
use futures_executor::block_on;
use log::info;
use serde_json::json;
use std::{env, fs};
use tranqui::{Call, Error, Registry};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let registry = Registry::new()
        .register("double", double)
        .register("fetch_user", fetch_user);

    let calls = match env::args().nth(1) {
        Some(path) => load_calls(&path)?,
        None => default_calls(),
    };

    for call in &calls {
        info!("running {} with {:?}", call.callback, call.args);
        let outcome = block_on(registry.dispatch(call));
        println!("{} -> {}", call.callback, serde_json::to_string(&outcome)?);
    }
    Ok(())
}

fn double(n: i64) -> Result<i64, Error> {
    if n < 0 {
        return Err(Error::msg("Negative not allowed"));
    }
    Ok(n * 2)
}

async fn fetch_user(id: u64) -> Result<String, Error> {
    if id == 0 {
        return Err(Error::msg("User not found"));
    }
    Ok(format!("User-{}", id))
}

/// Reads a JSON array of calls, e.g. `[{ "callback": "double", "args": [5] }]`.
fn load_calls(path: &str) -> anyhow::Result<Vec<Call>> {
    let raw = fs::read_to_string(path).with_context(|| format!("could not read {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a list of calls", path))
}

fn default_calls() -> Vec<Call> {
    vec![
        Call::new("double", vec![json!(5)]),
        Call::new("double", vec![json!(-5)]),
        Call::new("fetch_user", vec![json!(7)]),
        Call::new("fetch_user", vec![json!(0)]),
    ]
}
