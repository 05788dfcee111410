//! Building and inspecting trees at runtime.
//!
//! Run with: cargo run --example dynamic_values

use serde::Deserialize;
use serde_kitty::{from_section, section, Config, Value};
use std::error::Error;

#[derive(Debug, Deserialize)]
struct Node {
    addr: String,
    #[serde(default)]
    wgh: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let defaults = section! {
        "host" => "localhost",
        "port" => "8080",
        "features" => "auth, logging, metrics",
        "web" => { "ip" => "127.0.0.1" },
    };

    let config = Config::from_str("port = 9090\n[[node]]\n addr = a\n[[node]]\n addr = b\n wgh = 2\n")?;

    let mut merged = defaults.clone();
    merged.overlay(config.sections().clone());

    for (key, value) in &merged {
        println!("{:>10}: {}", key, value);
    }

    if let Some(port) = merged.get("port").and_then(Value::as_scalar) {
        println!("Accessing field 'port': {}", port);
    }
    if let Some(ip) = merged.lookup("web.ip").and_then(Value::as_scalar) {
        println!("Accessing field 'web.ip': {}", ip);
    }

    if let Some(nodes) = merged.get("node").and_then(Value::as_list) {
        for entry in nodes {
            let node: Node = from_section(entry.clone())?;
            println!("node {:?}", node);
        }
    }

    Ok(())
}
