/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Mappings become [`AutoMap`](crate::AutoMap)s at every depth and any
/// expression implementing `Into<Value>` can appear in value position,
/// including [`Node`](crate::Node)s.
///
/// # Examples
///
/// ```rust
/// use doctree::doc;
///
/// let value = doc!({
///     "name": "testObj",
///     "size": 5,
///     "nested": {"first_key": 2},
///     "flags": [true, false, null]
/// });
/// assert!(value.is_map());
/// ```
#[macro_export]
macro_rules! doc {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::doc!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Map($crate::AutoMap::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::AutoMap::new();
        $(
            map.insert($key, $crate::doc!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Fallback for any expression convertible into a Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
