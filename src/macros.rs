//! Small crate-wide convenience macros.

/// Build an attribute / CSS list of `(name, value)` string pairs without
/// sprinkling `.to_string()` over every builder call.
///
/// ```rust,ignore
/// let attrs = attrs! { "type" => "button", "aria-label" => "Close" };
/// assert_eq!(attrs[0], ("type".to_string(), "button".to_string()));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<(::std::string::String, ::std::string::String)>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        vec![$(($name.to_string(), $value.to_string())),+]
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn attrs_builds_pairs_in_order() {
        let attrs = attrs! { "type" => "button", "rows" => 3 };
        assert_eq!(
            attrs,
            vec![
                ("type".to_string(), "button".to_string()),
                ("rows".to_string(), "3".to_string()),
            ]
        );
        assert!(attrs! {}.is_empty());
    }
}
