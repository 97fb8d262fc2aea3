//! `define_port_error!` generates port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! field parameters accept anything convertible into the field type, so
//! adapters can write `CourseRepositoryError::query("failed to fetch")`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "store unreachable",
            Query { message: String } => "query failed: {message}",
            Partial { collection: String, deleted: u64 } =>
                "{collection}: removed {deleted}",
        }
    }

    #[test]
    fn unit_variants_get_zero_argument_constructors() {
        assert_eq!(SamplePortError::unreachable(), SamplePortError::Unreachable);
        assert_eq!(SamplePortError::unreachable().to_string(), "store unreachable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::query("failed to fetch notes");
        assert_eq!(err.to_string(), "query failed: failed to fetch notes");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::partial("notes", 3_u64);
        assert_eq!(err.to_string(), "notes: removed 3");
    }
}
