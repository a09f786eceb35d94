// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! plural {
    // Count + noun shorthand: plural!(1, "paper") → "1 paper", plural!(3, "paper") → "3 papers"
    ($n:expr, $noun:expr) => {{
        let n = $n;
        if n == 1 {
            ::std::format!("{} {}", n, $noun)
        } else {
            ::std::format!("{} {}s", n, $noun)
        }
    }};
}
