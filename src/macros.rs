//! Macros for declaring state name enums.

/// Generate a `StateName` enum with all the required derives.
///
/// The variants' identifiers become their labels. Enum names are always
/// valid, so machines keyed by them never hit the empty-name check.
///
/// # Example
///
/// ```
/// use statehook::state_names;
///
/// state_names! {
///     pub enum Checkout {
///         Cart,
///         Payment,
///         Confirmed,
///     }
/// }
///
/// use statehook::StateName;
/// assert_eq!(Checkout::Payment.label(), "Payment");
/// ```
#[macro_export]
macro_rules! state_names {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::StateName for $name {
            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::StateName;

    state_names! {
        enum TestName {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn macro_generates_labels_from_variants() {
        assert_eq!(TestName::Initial.label(), "Initial");
        assert_eq!(TestName::Processing.label(), "Processing");
        assert_eq!(TestName::Complete.label(), "Complete");
        assert!(TestName::Initial.is_valid());
    }

    #[test]
    fn macro_supports_visibility() {
        state_names! {
            pub enum PublicName {
                A,
                B,
            }
        }

        assert_eq!(PublicName::A.label(), "A");
    }

    #[test]
    fn generated_enums_serialize() {
        let json = serde_json::to_string(&TestName::Processing).unwrap();
        let decoded: TestName = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, TestName::Processing);
    }
}
