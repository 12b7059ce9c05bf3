//! Working with Value trees and decode options.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_ogson::{
    decode, decode_strict, decode_with_options, encode, ogson, to_value, DecodeOptions, Value,
};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with ogson! macro
    let config = ogson!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config as OGSON:\n{}\n", encode(&config));

    // Access values dynamically
    if let Some(host) = config["host"].as_str() {
        println!("Accessing field 'host': {}", host);
    }
    if let Some(port) = config["port"].as_i64() {
        println!("Accessing field 'port': {}", port);
    }
    if let Some(features) = config["features"].as_array() {
        println!("Accessing field 'features': {} items\n", features.len());
    }

    // Convert existing struct to Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };
    let user_value = to_value(&user)?;
    println!("User as OGSON:\n{}\n", user_value);

    // Lenient decoding keeps whatever it can; strict decoding explains what is wrong
    let truncated = "###@@@host!!!@@@localhost!!!@@@port!!!";
    println!("Lenient: {:?}", decode(truncated));
    if let Err(err) = decode_strict(truncated) {
        println!("Strict:  {}\n", err);
    }

    // Depth-counted nesting decodes trees deeper than one level
    let deep = ogson!({"a": {"b": {"c": "deep"}}});
    let text = encode(&deep);
    let value = decode_with_options(&text, &DecodeOptions::extended())?;
    assert_eq!(value, deep);
    println!("Deep tree: {}", text);
    println!("  a.b.c = {}", value["a"]["b"]["c"].as_str().unwrap_or_default());

    // Runtime type checking
    println!("\nType checks:");
    println!("  is_object: {}", user_value.is_object());
    println!("  is_array:  {}", user_value.is_array());
    println!("  is_string: {}", user_value.is_string());
    println!("  is_null:   {}", Value::Null.is_null());

    Ok(())
}
