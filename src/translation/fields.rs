//! Translatable attributes: the shared allowlist and per-type accessor tables.
//!
//! Each response type declares, through [`translatable!`], a table of named
//! getter/setter pairs for its text attributes. The overlay engine only
//! touches entries whose name is also in [`TRANSLATABLE_FIELDS`].

/// Attribute names eligible for overlay, shared by every record type.
pub const TRANSLATABLE_FIELDS: &[&str] = &[
    "title",
    "description",
    "name",
    "position",
    "company",
    "location",
    "category",
    "institution",
    "degree",
    "fieldOfStudy",
];

pub fn is_translatable(field_name: &str) -> bool {
    TRANSLATABLE_FIELDS.contains(&field_name)
}

/// A text-typed attribute that can be read and overwritten.
pub trait TextAttribute {
    fn text(&self) -> Option<&str>;
    fn replace_text(&mut self, value: String);
}

impl TextAttribute for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn replace_text(&mut self, value: String) {
        *self = value;
    }
}

impl TextAttribute for Option<String> {
    fn text(&self) -> Option<&str> {
        self.as_deref()
    }

    fn replace_text(&mut self, value: String) {
        *self = Some(value);
    }
}

/// Named getter/setter pair over one text attribute of `T`.
pub struct FieldAccessor<T> {
    pub name: &'static str,
    pub get: fn(&T) -> Option<&str>,
    pub set: fn(&mut T, String),
}

/// A response object the overlay engine can patch.
pub trait Translatable: Send + 'static {
    /// Identifier of the owning record, if the object carries one.
    fn record_id(&self) -> Option<i64>;

    /// Accessor table for the object's text attributes.
    fn fields() -> &'static [FieldAccessor<Self>]
    where
        Self: Sized;
}

/// Implements [`Translatable`] for a struct.
///
/// ```rust,ignore
/// translatable!(Education, id: id, {
///     institution => "institution",
///     field_of_study => "fieldOfStudy",
/// });
/// ```
#[macro_export]
macro_rules! translatable {
    ($ty:ty, id: $id:ident, { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::translation::Translatable for $ty {
            fn record_id(&self) -> Option<i64> {
                self.$id
            }

            fn fields() -> &'static [$crate::translation::FieldAccessor<Self>] {
                const FIELDS: &[$crate::translation::FieldAccessor<$ty>] = &[
                    $(
                        $crate::translation::FieldAccessor {
                            name: $name,
                            get: {
                                fn get(record: &$ty) -> Option<&str> {
                                    $crate::translation::TextAttribute::text(&record.$field)
                                }
                                get
                            },
                            set: {
                                fn set(record: &mut $ty, value: String) {
                                    $crate::translation::TextAttribute::replace_text(
                                        &mut record.$field,
                                        value,
                                    );
                                }
                                set
                            },
                        },
                    )*
                ];
                FIELDS
            }
        }
    };
}
