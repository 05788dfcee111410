/// Builds a [`Section`](crate::Section) tree from a literal description.
///
/// Values are written as strings (scalars), `{ .. }` (nested sections) or
/// `[{ .. }, ..]` (lists of sections).
///
/// # Examples
///
/// ```rust
/// use serde_kitty::{section, Config};
///
/// let expected = section! {
///     "host" => "example.com",
///     "web" => { "ip" => "10.0.0.1" },
///     "cluster" => [{ "addr" => "a" }, { "addr" => "b" }],
/// };
///
/// let config = Config::from_str("\
/// host = example.com
/// [web]
///  ip = 10.0.0.1
/// [[cluster]]
///  addr = a
/// [[cluster]]
///  addr = b
/// ").unwrap();
///
/// assert_eq!(config.sections(), &expected);
/// ```
#[macro_export]
macro_rules! section {
    (@value { $($inner:tt)* }) => {
        $crate::Value::Nested($crate::section!($($inner)*))
    };

    (@value [ $({ $($inner:tt)* }),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::section!($($inner)*)),*])
    };

    (@value $scalar:expr) => {
        $crate::Value::from($scalar)
    };

    () => {
        $crate::Section::new()
    };

    ($($key:literal => $value:tt),+ $(,)?) => {{
        let mut section = $crate::Section::new();
        $(
            section.insert($key.to_string(), $crate::section!(@value $value));
        )+
        section
    }};
}
