/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// Object members keep the order they are written in. Anything that is not `null`,
/// a boolean, an array or an object literal is converted with
/// [`to_value`](crate::to_value), falling back to `Null` if it cannot be serialized.
///
/// # Examples
///
/// ```rust
/// use serde_ogson::{ogson, Value};
///
/// let manifest = ogson!({
///     "name": "ogson",
///     "private": true,
///     "keywords": ["wheel", "reinventing"]
/// });
/// assert_eq!(manifest["keywords"][1], Value::from("reinventing"));
/// ```
#[macro_export]
macro_rules! ogson {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::ogson!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::ogson!($value));
        )*
        $crate::Value::Object(object)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
