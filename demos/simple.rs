//! Encoding and decoding a package manifest.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_ogson::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Scripts {
    test: String,
    run: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Manifest {
    name: String,
    version: String,
    awesome: bool,
    scripts: Scripts,
    keywords: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest = Manifest {
        name: "ogson".to_string(),
        version: "1.0.0".to_string(),
        awesome: false,
        scripts: Scripts {
            test: "node test.js".to_string(),
            run: "node index.js".to_string(),
        },
        keywords: vec![
            "object".to_string(),
            "notation".to_string(),
            "wheel".to_string(),
            "reinventing".to_string(),
        ],
    };

    let text = to_string(&manifest)?;
    println!("OGSON output:\n{}\n", text);

    let manifest_back: Manifest = from_str(&text)?;
    assert_eq!(manifest, manifest_back);
    println!("✓ Round-trip successful");

    // Whitespace and commentary outside the markers are ignored
    let annotated = "my manifest\n###\n  @@@name!!! @@@ogson!!!\n  @@@version!!! @@@2.0.0!!!\n  \
                     @@@awesome!!! @@@TRUE!!!\n  @@@scripts!!! @@@###@@@test!!!@@@t!!!@@@run!!!@@@r!!!^^^!!!\n  \
                     @@@keywords!!! @@@[[[]]]!!!\n^^^";
    let parsed: Manifest = from_str(annotated)?;
    println!("Parsed annotated document: {:?}", parsed);

    Ok(())
}
