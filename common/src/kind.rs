//! Macros for defining kind enums.

/// Macro for defining a closed, string-backed kind enum.
///
/// Every variant is bound to its textual representation, which is used by
/// [`Display`], [`FromStr`] and (with the `postgres` feature of the calling
/// crate) by the `VARCHAR` column mapping. Any other string is rejected.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
/// #
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube."]
///         Cube = "cube",
///
///         #[doc = "A sphere."]
///         Sphere = "sphere",
///     }
/// }
///
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!("sphere".parse::<Kind>().unwrap(), Kind::Sphere);
/// assert!("cone".parse::<Kind>().is_err());
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        pub enum $name {
            $(
                #[doc = $variant_doc]
                #[strum(serialize = $value)]
                $variant,
            )*
        }

        impl $name {
            /// All the possible values, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the textual representation of this value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)*
                }
            }
        }

        #[cfg(feature = "postgres")]
        impl<'a> $crate::private::postgres_types::FromSql<'a> for $name {
            $crate::private::postgres_types::accepts!(VARCHAR, TEXT);

            fn from_sql(
                ty: &$crate::private::postgres_types::Type,
                raw: &'a [u8],
            ) -> Result<
                $name,
                Box<dyn ::std::error::Error
                    + ::core::marker::Sync
                    + ::core::marker::Send>,
            > {
                let s = <&str as $crate::private::postgres_types::FromSql>
                    ::from_sql(ty, raw)?;
                <$name as ::core::str::FromStr>::from_str(s).map_err(|_| {
                    ::std::format!(
                        "invalid `{}` value: {s}",
                        ::core::stringify!($name),
                    )
                    .into()
                })
            }
        }

        #[cfg(feature = "postgres")]
        impl $crate::private::postgres_types::ToSql for $name {
            $crate::private::postgres_types::accepts!(VARCHAR, TEXT);
            $crate::private::postgres_types::to_sql_checked!();

            fn to_sql(
                &self,
                ty: &$crate::private::postgres_types::Type,
                w: &mut $crate::private::postgres_types::private::BytesMut,
            ) -> Result<
                $crate::private::postgres_types::IsNull,
                ::std::boxed::Box<
                    dyn ::std::error::Error
                        + ::core::marker::Sync
                        + ::core::marker::Send
                >,
            > {
                <&str as $crate::private::postgres_types::ToSql>::to_sql(
                    &self.as_str(),
                    ty,
                    w,
                )
            }
        }
    };
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    define_kind! {
        #[doc = "Test kind."]
        enum Phase {
            #[doc = "First."]
            Waiting = "waiting",

            #[doc = "Second."]
            InProgress = "in_progress",
        }
    }

    #[test]
    fn displays_bound_value() {
        assert_eq!(Phase::Waiting.to_string(), "waiting");
        assert_eq!(Phase::InProgress.to_string(), "in_progress");
        assert_eq!(Phase::InProgress.as_str(), "in_progress");
    }

    #[test]
    fn parses_bound_value_only() {
        assert_eq!(Phase::from_str("waiting").unwrap(), Phase::Waiting);
        assert_eq!(Phase::from_str("in_progress").unwrap(), Phase::InProgress);

        assert!(Phase::from_str("Waiting").is_err());
        assert!(Phase::from_str("InProgress").is_err());
        assert!(Phase::from_str("").is_err());
    }

    #[test]
    fn lists_all_values() {
        assert_eq!(Phase::ALL, &[Phase::Waiting, Phase::InProgress]);
    }
}
