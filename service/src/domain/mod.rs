//! Domain definitions.

/// Defines a validated text newtype.
///
/// A valid value is not blank, has no leading or trailing whitespace and is
/// at most `max` characters long. Free text (`trimmed = false`) may keep
/// surrounding whitespace.
macro_rules! define_text {
    (
        #[doc = $doc:literal]
        $name:ident(max = $max:expr)
    ) => {
        define_text! {
            #[doc = $doc]
            $name(max = $max, trimmed = true)
        }
    };

    (
        #[doc = $doc:literal]
        $name:ident(max = $max:expr, trimmed = $trimmed:literal)
    ) => {
        #[doc = $doc]
        #[derive(
            ::derive_more::AsRef,
            Clone,
            Debug,
            ::derive_more::Display,
            Eq,
            Hash,
            PartialEq,
        )]
        #[as_ref(str, String)]
        #[cfg_attr(
            feature = "postgres",
            derive(::postgres_types::FromSql, ::postgres_types::ToSql),
            postgres(transparent)
        )]
        pub struct $name(String);

        impl $name {
            #[doc = concat!(
                "Maximum length of a [`",
                stringify!($name),
                "`] in characters.",
            )]
            pub const MAX_LEN: usize = $max;

            /// Indicator whether surrounding whitespace is rejected.
            const TRIMMED: bool = $trimmed;

            #[doc = concat!(
                "Creates a new [`",
                stringify!($name),
                "`] if the given `value` is valid.",
            )]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::check(&value).then_some(Self(value))
            }

            #[doc = concat!(
                "Checks whether the given `value` is a valid [`",
                stringify!($name),
                "`].",
            )]
            fn check(value: &str) -> bool {
                (!Self::TRIMMED || value.trim() == value)
                    && !value.trim().is_empty()
                    && value.chars().count() <= Self::MAX_LEN
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s).ok_or(concat!("invalid `", stringify!($name), "`"))
            }
        }
    };
}

pub mod amenity;
pub mod lease;
pub mod maintenance;
pub mod property;
pub mod user;

pub use self::{
    amenity::Amenity, lease::Lease, maintenance::MaintenanceRequest,
    property::{Media, Property},
    user::User,
};
