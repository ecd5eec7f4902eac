#[macro_export]
macro_rules! field_type_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Unknown,
                0,
                Any,
                considers_nulls = true
            ),
            (
                Integer,
                1,
                Numeric,
                considers_nulls = false
            ),
            (
                Unsigned,
                2,
                Numeric,
                considers_nulls = false
            ),
            (
                Float,
                3,
                Numeric,
                considers_nulls = false
            ),
            (
                String,
                4,
                Textual,
                considers_nulls = false
            ),
            (
                Boolean,
                5,
                Bool,
                considers_nulls = false
            ),
            (
                Tag,
                6,
                Textual,
                considers_nulls = false
            ),
        }
    };
}

#[macro_export]
macro_rules! field_type_registry {
    ($macro:ident) => {
        $crate::field_type_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::field_type_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($ty:ident, $code:literal, $family:ident, considers_nulls = $considers_nulls:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::FieldType::$ty => $crate::FieldTypeMetadata {
                    code: $code,
                    family: $crate::LiteralFamily::$family,
                    considers_nulls: $considers_nulls,
                },
            )*
        }
    };
}

macro_rules! from_code_from_registry {
    ( @args $code:expr; @entries $( ($ty:ident, $type_code:literal, $family:ident, considers_nulls = $considers_nulls:expr) ),* $(,)? ) => {
        match $code {
            $( $type_code => Some($crate::FieldType::$ty), )*
            _ => None,
        }
    };
}

macro_rules! all_types_from_registry {
    ( @entries $( ($ty:ident, $code:literal, $family:ident, considers_nulls = $considers_nulls:expr) ),* $(,)? ) => {
        [ $( $crate::FieldType::$ty ),* ]
    };
}
