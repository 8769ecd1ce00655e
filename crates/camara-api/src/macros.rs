// Declarative schema macros.
//
// `model!` turns one field table into the struct, its serde attributes, the
// `Model::FIELDS` descriptor, `new`, the `with_*` setters and a builder.
// `api_enum!` does the same for closed string vocabularies. Integer fields
// use i32/i64 so bare literals infer through the `impl Into<_>` setters.

/// Declare a closed, string-backed enum.
///
/// ```ignore
/// api_enum! {
///     pub enum QosStatus {
///         Requested = "REQUESTED",
///         Available = "AVAILABLE",
///     }
/// }
/// ```
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:tt ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            strum::Display,
            strum::EnumString,
            strum::EnumIter,
            strum::IntoStaticStr,
            strum::AsRefStr,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                #[strum(serialize = $wire)]
                $variant,
            )+
        }

        impl $crate::model::ApiEnum for $name {
            const NAME: &'static str = stringify!($name);
        }

        impl $crate::model::CheckShape for $name {}
    };
}

/// Declare a model, its descriptor table and its builder.
///
/// Each field is written `canonical / with_setter: Type = "wireName"`.
/// Required fields are stored as `Type`, optional ones as `Option<Type>`
/// and skipped on serialization when absent.
///
/// A trailing `variants "tagWire" { "LITERAL" => ["wire", ...] }` block
/// declares a discriminated shape: when the tag field holds `LITERAL`, the
/// listed optional fields become required.
///
/// ```ignore
/// model! {
///     pub struct PortRange / PortRangeBuilder {
///         required {
///             from / with_from: i32 = "from",
///             to / with_to: i32 = "to",
///         }
///         optional {}
///     }
/// }
/// ```
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident / $builder:ident {
            required {
                $( $(#[$rmeta:meta])* $rfield:ident / $rwith:ident : $rty:ty = $rwire:tt ),* $(,)?
            }
            optional {
                $( $(#[$ometa:meta])* $ofield:ident / $owith:ident : $oty:ty = $owire:tt ),* $(,)?
            }
            $(
                variants $tag:literal {
                    $( $case:literal => [ $( $needs:literal ),* $(,)? ] ),* $(,)?
                }
            )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$rmeta])*
                #[serde(rename = $rwire)]
                pub $rfield: $rty,
            )*
            $(
                $(#[$ometa])*
                #[serde(rename = $owire, default, skip_serializing_if = "Option::is_none")]
                pub $ofield: Option<$oty>,
            )*
        }

        impl $name {
            /// Construct with every required field; optional fields start absent.
            #[allow(clippy::too_many_arguments, clippy::new_without_default)]
            pub fn new($( $rfield: impl Into<$rty> ),*) -> Self {
                Self {
                    $( $rfield: $rfield.into(), )*
                    $( $ofield: None, )*
                }
            }

            /// Start an incremental builder; required fields are checked by `build()`.
            pub fn builder() -> $builder {
                $builder::default()
            }

            $(
                #[doc = concat!("Copy of `self` with `", stringify!($rfield), "` replaced.")]
                pub fn $rwith(mut self, value: impl Into<$rty>) -> Self {
                    self.$rfield = value.into();
                    self
                }
            )*

            $(
                #[doc = concat!("Copy of `self` with `", stringify!($ofield), "` set.")]
                pub fn $owith(mut self, value: impl Into<$oty>) -> Self {
                    self.$ofield = Some(value.into());
                    self
                }
            )*
        }

        impl $crate::model::Model for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::model::Field] = &[
                $( $crate::model::Field::required(stringify!($rfield), $rwire, stringify!($rty)), )*
                $( $crate::model::Field::optional(stringify!($ofield), $owire, stringify!($oty)), )*
            ];

            fn check_fields(
                map: &serde_json::Map<String, serde_json::Value>,
            ) -> Result<(), $crate::Error> {
                $(
                    match map.get($rwire) {
                        None | Some(serde_json::Value::Null) => {
                            return Err($crate::Error::MissingRequiredField {
                                model: stringify!($name),
                                field: $rwire.to_owned(),
                            });
                        }
                        Some(value) => <$rty as $crate::model::CheckShape>::check_shape(value)?,
                    }
                )*
                $(
                    if let Some(value) = map.get($owire) {
                        <$oty as $crate::model::CheckShape>::check_shape(value)?;
                    }
                )*
                $(
                    $crate::shape::check_variant(
                        map,
                        stringify!($name),
                        $tag,
                        &[ $( ($case, [ $( $needs ),* ].as_slice()) ),* ],
                    )?;
                )?
                Ok(())
            }
        }

        impl $crate::model::CheckShape for $name {
            fn check_shape(value: &serde_json::Value) -> Result<(), $crate::Error> {
                match value {
                    serde_json::Value::Object(map) => {
                        <Self as $crate::model::Model>::check_fields(map)
                    }
                    _ => Ok(()),
                }
            }
        }

        #[doc = concat!("Incremental builder for [`", stringify!($name), "`].")]
        #[derive(Debug, Default)]
        $vis struct $builder {
            $( $rfield: Option<$rty>, )*
            $( $ofield: Option<$oty>, )*
            rejected: Option<$crate::Error>,
        }

        impl $builder {
            $(
                pub fn $rfield(mut self, value: impl $crate::model::IntoField<$rty>) -> Self {
                    match $crate::model::IntoField::into_field(value) {
                        Ok(v) => self.$rfield = Some(v),
                        Err(e) => {
                            self.rejected.get_or_insert(e);
                        }
                    }
                    self
                }
            )*

            $(
                pub fn $ofield(mut self, value: impl $crate::model::IntoField<$oty>) -> Self {
                    match $crate::model::IntoField::into_field(value) {
                        Ok(v) => self.$ofield = Some(v),
                        Err(e) => {
                            self.rejected.get_or_insert(e);
                        }
                    }
                    self
                }
            )*

            /// Finish construction.
            ///
            /// Fails with the first conversion error recorded by a setter,
            /// then with `MissingRequiredField` for the first unset required
            /// field, here or in a nested value.
            pub fn build(self) -> Result<$name, $crate::Error> {
                if let Some(err) = self.rejected {
                    return Err(err);
                }
                let built = $name {
                    $(
                        $rfield: self.$rfield.ok_or_else(|| $crate::Error::MissingRequiredField {
                            model: stringify!($name),
                            field: $rwire.to_owned(),
                        })?,
                    )*
                    $( $ofield: self.$ofield, )*
                };
                let fields = $crate::model::Model::to_shape(&built)?;
                <$name as $crate::model::Model>::check_fields(&fields)?;
                Ok(built)
            }
        }
    };
}
