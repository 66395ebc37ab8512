// Helper macro to distinguish between patterns and expressions
#[macro_export]
macro_rules! assert_case {
    // Guard patterns - patterns with if conditions
    ($result:expr, { $pattern:pat if $guard:expr }) => {
        match $result {
            $pattern if $guard => {},
            other => panic!("Expected {} if {} but got {:?}", stringify!($pattern), stringify!($guard), other),
        }
    };

    // Pattern matching cases - detect common pattern forms
    ($result:expr, { Ok($($pattern:tt)*) }) => {
        match $result {
            Ok($($pattern)*) => {},
            other => panic!("Expected Ok({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Err($($pattern:tt)*) }) => {
        match $result {
            Err($($pattern)*) => {},
            other => panic!("Expected Err({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { Some($($pattern:tt)*) }) => {
        match $result {
            Some($($pattern)*) => {},
            other => panic!("Expected Some({}) but got {:#?}", stringify!($($pattern)*), other),
        }
    };

    ($result:expr, { None }) => {
        match $result {
            None => {},
            other => panic!("Expected None but got {:#?}", other),
        }
    };

    // Wildcard pattern
    ($result:expr, { _ }) => {
        let _ = $result;
    };

    // Default case - treat as expression for equality comparison
    ($result:expr, { $expected:expr }) => {
        let actual = $result;
        pretty_assertions::assert_eq!(actual, $expected, "\n\n< got / expected >");
    };
}

// Helper macro to generate test functions based on field names
#[macro_export]
macro_rules! handle_case {
    ([$($attrs:meta)*] size, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_size() {
            assert_case!(view().size(), $expected);
        }
    };

    ([$($attrs:meta)*] elements, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_elements() {
            assert_case!(view().iter().collect::<Vec<_>>(), $expected);
        }
    };

    // Sets iterate in storage order; compare them sorted.
    ([$($attrs:meta)*] members, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_members() {
            let mut members: Vec<_> = view().iter().collect();
            members.sort();
            assert_case!(members, $expected);
        }
    };

    ([$($attrs:meta)*] display, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_display() {
            assert_case!(view().to_string(), $expected);
        }
    };

    ([$($attrs:meta)*] non_empty, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_non_empty() {
            assert_case!(view().to_non_empty().map(|non_empty| non_empty.size()), $expected);
        }
    };

    ([$($attrs:meta)*] immutable, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_immutable() {
            assert_case!(view().copy_elision(), $expected);
        }
    };

    ([$($attrs:meta)*] result, $expected:tt) => {
        $(#[$attrs])*
        #[test]
        fn validate_result() {
            assert_case!(view().clone(), $expected);
        }
    };

    // Generic case for unknown field names
    ([$($attrs:meta)*] $field_name:ident, $expected:tt) => {
        compile_error!(concat!("Unknown test case field: ", stringify!($field_name)));
    };
}

// Helper macro to recursively parse assertion fields
#[macro_export]
macro_rules! parse_assertions {
    // Base case: no more fields to parse
    (@parse [$($test_functions:tt)*]) => {
        $($test_functions)*
    };

    (@parse [$($test_functions:tt)*] $(#[$attr:meta])* $field_name:ident: $field_value:tt, $($rest:tt)*) => {
        parse_assertions! {@parse [
            $($test_functions)*
            handle_case! {[$($attr)*] $field_name, $field_value}
        ] $($rest)*}
    };
}

// Main macro - name, type and view first, then assertions in any order.
//
// The view is built once and shared by every generated test.
#[macro_export]
macro_rules! test_case {
    (
        name: $name:ident,
        ty: $ty:ty,
        view: $view:expr,
        $($assertion_fields:tt)*
    ) => {
        mod $name {
            #![allow(unused_imports, dead_code)]

            use super::*;
            use once_cell::sync::OnceCell;

            fn view() -> &'static $ty {
                static VIEW_CELL: OnceCell<$ty> = OnceCell::new();
                VIEW_CELL.get_or_init(|| $view)
            }

            parse_assertions! {@parse [] $($assertion_fields)*}
        }
    };
}
