//! `define_port_error!`: error enums for adapter boundaries.
//!
//! Every variant carries named fields and a display message. A snake-case
//! constructor taking `impl Into<_>` per field is generated alongside, so
//! adapters write `AssetStoreError::io(format!(..))` rather than spelling out
//! the struct variant.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum UploadProbeError {
            DiskFull { path: String, needed: u64 } => "{path} needs {needed} more bytes",
            NameTaken { name: String } => "{name} already exists",
        }
    }

    #[test]
    fn constructor_converts_each_field() {
        let err = UploadProbeError::disk_full("uploads", 512_u32);
        assert_eq!(
            err,
            UploadProbeError::DiskFull {
                path: "uploads".to_owned(),
                needed: 512
            }
        );
        assert_eq!(err.to_string(), "uploads needs 512 more bytes");
    }

    #[test]
    fn multi_word_variants_get_snake_case_constructors() {
        let err = UploadProbeError::name_taken("1700000000000-cat.png");
        assert_eq!(err.to_string(), "1700000000000-cat.png already exists");
    }
}
