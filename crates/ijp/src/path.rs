use alloc::{sync::Arc, vec::Vec};
use core::fmt;

/// A path to a JSON value, from the document root down.
///
/// The root value has the empty path.
pub type Path = Vec<PathComponent>;

/// One segment of a [`Path`].
///
/// Keys are reference counted so that every event can carry its own snapshot
/// of the path without copying key text.
///
/// # Examples
///
/// ```
/// use ijp::PathComponent;
///
/// let key = PathComponent::Key("foo".into());
/// assert_eq!(key.as_key(), Some("foo"));
///
/// let idx = PathComponent::Index(3);
/// assert_eq!(idx.as_index(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathComponent {
    /// An object member name.
    Key(Arc<str>),
    /// An array position.
    Index(usize),
}

impl PathComponent {
    /// The member name, if this is a key.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathComponent::Key(k) => Some(k),
            PathComponent::Index(_) => None,
        }
    }

    /// The array position, if this is an index.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathComponent::Key(_) => None,
            PathComponent::Index(i) => Some(*i),
        }
    }
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Key(k) => write!(f, "{k:?}"),
            PathComponent::Index(i) => write!(f, "{i}"),
        }
    }
}

// Convenient conversions so users can write `path![0, "foo"]` etc.
macro_rules! impl_from_int_for_pathcomponent {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PathComponent {
                #[allow(clippy::cast_possible_truncation)]
                fn from(i: $t) -> Self {
                    PathComponent::Index(i as usize)
                }
            }
        )*
    };
}

impl_from_int_for_pathcomponent!(u8, u16, u32, u64, usize);

impl From<&str> for PathComponent {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<alloc::string::String> for PathComponent {
    fn from(s: alloc::string::String) -> Self {
        Self::Key(s.into())
    }
}

impl From<Arc<str>> for PathComponent {
    fn from(s: Arc<str>) -> Self {
        Self::Key(s)
    }
}

#[doc(hidden)]
pub trait PathComponentFrom<T> {
    fn from_path_component(value: T) -> PathComponent;
}

macro_rules! impl_unsigned_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathComponentFrom<$t> for PathComponent {
                fn from_path_component(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
                    PathComponent::Index(value as usize)
                }
            }
        )+
    };
}
impl_unsigned_as_path_component!(u8, u16, u32, u64, usize);

// `path![0, 1]` infers `i32` literals; negative values clamp to zero.
macro_rules! impl_signed_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathComponentFrom<$t> for PathComponent {
                fn from_path_component(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    PathComponent::Index(value.max(0) as usize)
                }
            }
        )+
    };
}
impl_signed_as_path_component!(i8, i16, i32, i64, isize);

impl PathComponentFrom<&str> for PathComponent {
    fn from_path_component(value: &str) -> Self {
        PathComponent::Key(value.into())
    }
}

impl PathComponentFrom<alloc::string::String> for PathComponent {
    fn from_path_component(value: alloc::string::String) -> Self {
        PathComponent::Key(value.into())
    }
}

/// Renders a path as `$`, `$["a"][0]` and so on, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct DisplayPath<'a>(pub &'a [PathComponent]);

impl fmt::Display for DisplayPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for component in self.0 {
            write!(f, "[{component}]")?;
        }
        Ok(())
    }
}

// Custom (de)serialization so that a `Vec<PathComponent>` becomes e.g.
// `["foo", 0, "bar"]` instead of the default tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use core::fmt;

    use serde::{
        Deserialize, Deserializer, Serialize, Serializer,
        de::{Error, Unexpected, Visitor},
    };

    use super::PathComponent;

    impl Serialize for PathComponent {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                PathComponent::Key(k) => serializer.serialize_str(k),
                PathComponent::Index(i) => serializer.serialize_u64(*i as u64),
            }
        }
    }

    struct PathComponentVisitor;

    impl Visitor<'_> for PathComponentVisitor {
        type Value = PathComponent;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or unsigned integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(PathComponent::Key(value.into()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(PathComponent::Index)
                .map_err(|_| Error::invalid_value(Unexpected::Unsigned(value), &"a usize index"))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            usize::try_from(value)
                .map(PathComponent::Index)
                .map_err(|_| Error::invalid_value(Unexpected::Signed(value), &"non-negative index"))
        }
    }

    impl<'de> Deserialize<'de> for PathComponent {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(PathComponentVisitor)
        }
    }
}
