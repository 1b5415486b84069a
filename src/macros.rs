// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Concatenate string-likes into a fresh `String`.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// `raw_row![Cell::header("A"), Cell::data("x").span(1, 2)]`
#[macro_export]
macro_rules! raw_row {
    ($($cell:expr),* $(,)?) => {
        $crate::engine::types::RawRow::new(::std::vec![$($cell),*])
    };
}
