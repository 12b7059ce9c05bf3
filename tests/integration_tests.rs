use serde::{Deserialize, Serialize};
use serde_ogson::{
    decode, from_str, from_str_with_options, from_value, to_string, to_value, DecodeOptions,
    Error, Value,
};
use serde_json::json;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Scripts {
    test: String,
    run: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Manifest {
    name: String,
    version: String,
    awesome: bool,
    scripts: Scripts,
    keywords: Vec<String>,
    #[serde(default)]
    license: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Active,
    Suspended { reason: String },
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Account {
    id: u32,
    status: Status,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.5,
                quantity: 1,
            },
        ],
        total: 109.48,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "###@@@id!!!@@@123!!!@@@name!!!@@@Alice!!!@@@active!!!@@@true!!!\
         @@@tags!!!@@@[[[@@@admin!!!@@@developer!!!]]]!!!^^^"
    );

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_manifest_fixture_into_struct() {
    let manifest: Manifest = from_str(include_str!("fixtures/decode/comments.ogson")).unwrap();
    assert_eq!(manifest.name, "ogson");
    assert!(!manifest.awesome);
    assert_eq!(manifest.scripts.run, "node index.js");
    assert_eq!(manifest.keywords[3], "reinventing");
    assert_eq!(manifest.license, None);
}

#[test]
fn test_nested_struct_needs_depth_counting() {
    init_tracing();
    let order = order();
    let text = to_string(&order).unwrap();

    let strict = DecodeOptions::strict();
    let result: Result<Order, Error> = from_str_with_options(&text, &strict);
    assert!(matches!(result, Err(Error::UnexpectedNestingDepth { .. })));

    let order_back: Order = from_str_with_options(&text, &DecodeOptions::extended()).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_enum_variants() {
    let active = Account {
        id: 1,
        status: Status::Active,
    };
    let text = to_string(&active).unwrap();
    assert_eq!(text, "###@@@id!!!@@@1!!!@@@status!!!@@@Active!!!^^^");
    assert_eq!(from_str::<Account>(&text).unwrap(), active);

    let suspended = Account {
        id: 2,
        status: Status::Suspended {
            reason: "spam".to_string(),
        },
    };
    let text = to_string(&suspended).unwrap();
    let back: Account = from_str_with_options(&text, &DecodeOptions::extended()).unwrap();
    assert_eq!(back, suspended);
}

#[test]
fn test_strings_that_look_like_scalars_are_coerced_back() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Labels {
        zip: String,
        flag: String,
    }

    let labels = Labels {
        zip: "02134".to_string(),
        flag: "TRUE".to_string(),
    };
    let back: Labels = from_str(&to_string(&labels).unwrap()).unwrap();
    // Inference turns both payloads into scalars; string fields print them back.
    assert_eq!(back.zip, "2134");
    assert_eq!(back.flag, "true");
}

#[test]
fn test_type_mismatch() {
    let result: Result<User, Error> = from_str("@@@just a string!!!");
    assert!(result.is_err());

    let result: Result<u8, Error> = from_value(Value::from("x"));
    assert!(result.is_err());
}

#[test]
fn test_json_value_through_to_value() {
    let json = json!({
        "a": 1,
        "b": [true, null],
        "c": "x"
    });
    let value = to_value(&json).unwrap();
    assert_eq!(value["a"], Value::Number(1.0));
    assert_eq!(value["b"][1], Value::Null);
    assert_eq!(
        value.to_string(),
        "###@@@a!!!@@@1!!!@@@b!!!@@@[[[@@@true!!!@@@!!!]]]!!!@@@c!!!@@@x!!!^^^"
    );
}

#[test]
fn test_decoded_tree_into_json_value() {
    let value = decode(include_str!("fixtures/decode/complex.ogson"));
    let json: serde_json::Value = from_value(value).unwrap();
    assert_eq!(
        json,
        json!({
            "name": "ogson",
            "version": "1.0.0",
            "awesome": false,
            "scripts": {"test": "node test.js", "run": "node index.js"},
            "keywords": ["object", "notation", "wheel", "reinventing"]
        })
    );
}

#[test]
fn test_lenient_decode_logs_and_recovers() {
    init_tracing();
    let value = decode("###@@@a!!!@@@1!!!@@@b!!!");
    assert_eq!(value["a"], Value::Number(1.0));
    assert_eq!(value["b"], Value::Null);
}
