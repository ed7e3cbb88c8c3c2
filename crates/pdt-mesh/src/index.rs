//! Type-safe index wrappers
//!
//! Newtypes keep vertex, edge, face and object indices from being mixed up
//! when they cross the capability traits.

use std::fmt;

/// Invalid index marker value
pub const INVALID_INDEX: u32 = u32::MAX;

macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $debug_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new index
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Raw index value as usize
            #[inline]
            pub const fn as_usize(&self) -> usize {
                self.0 as usize
            }

            /// Whether this is a valid index
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self.0 != INVALID_INDEX
            }

            /// The invalid marker
            #[inline]
            pub const fn invalid() -> Self {
                $name(INVALID_INDEX)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $debug_name, self.0)
                } else {
                    write!(f, "{}(INVALID)", $debug_name)
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                $name(index as u32)
            }
        }
    };
}

define_index!(
    /// Index into a mesh's vertex array
    VertexIndex, "VertexIndex"
);

define_index!(
    /// Index into a mesh's edge array
    EdgeIndex, "EdgeIndex"
);

define_index!(
    /// Index into a mesh's face array
    FaceIndex, "FaceIndex"
);

define_index!(
    /// Index into the scene's object list
    ObjectIndex, "ObjectIndex"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_debug() {
        assert_eq!(format!("{:?}", VertexIndex(3)), "VertexIndex(3)");
        assert_eq!(format!("{:?}", EdgeIndex::invalid()), "EdgeIndex(INVALID)");
        assert_eq!(FaceIndex::from(7usize).as_usize(), 7);
    }
}
