/// Returns the version of the contact form backend.
pub fn contact_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Asserts that an expression matches a pattern, optionally followed by a
/// guard.
///
/// #### Example
/// ```rust
/// # use contact_utils::assert_matches;
/// let result: Result<u8, &str> = Ok(42);
/// assert_matches!(result, Ok(42));
/// assert_matches!(result, Ok(x) if *x > 7);
/// ```
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}
