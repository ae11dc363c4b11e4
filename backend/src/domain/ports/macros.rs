//! `define_port_error!` generates a port error enum with a `thiserror`
//! message per variant and a snake_case constructor per variant whose
//! fields accept anything `Into` the declared type.

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
            Connection { message: String } => "connection failed: {message}",
            Missing { id: i64 } => "row {id} missing",
            Duplicate { table: String, rows: u32 } => "{table}: {rows} duplicates",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_take_borrowed_input() {
        assert_eq!(
            SamplePortError::connection("refused").to_string(),
            "connection failed: refused"
        );
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(SamplePortError::missing(7_i64).to_string(), "row 7 missing");
    }

    #[test]
    fn multiple_fields_and_unit_variants_get_constructors() {
        assert_eq!(
            SamplePortError::duplicate("users", 2_u32).to_string(),
            "users: 2 duplicates"
        );
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }
}
