//! Dumping every parsed key and value without a destination type.
//!
//! Run with: cargo run --example all_key_value [path]

use serde_kitty::{Config, Section, Value};
use std::error::Error;

fn print_section(section: &Section, indent: usize) {
    let pad = " ".repeat(indent);
    for (key, value) in section {
        match value {
            Value::Scalar(text) => println!("{}{} = {}", pad, key, text),
            Value::Nested(inner) => {
                println!("{}[{}]", pad, key);
                print_section(inner, indent + 1);
            }
            Value::List(entries) => {
                for entry in entries {
                    println!("{}[[{}]]", pad, key);
                    print_section(entry, indent + 1);
                }
            }
            Value::Tokens(tokens) => println!("{}{} = {}", pad, key, tokens.join(", ")),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/test.conf").to_string());

    let config = Config::from_file(&path)?;

    println!("All options in {}:\n", path);
    print_section(config.sections(), 0);

    println!("\nAs JSON:\n{}", serde_json::to_string_pretty(config.sections())?);

    Ok(())
}
