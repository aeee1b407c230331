use serde::{Deserialize, Serialize};
use std::ptr::NonNull;
use uuid::Uuid;

/// Opaque identifier for a caller-owned object stored in an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-owning reference to caller data associated with an entry.
///
/// The index copies handles around and compares them with [`same_handle`](Handle::same_handle);
/// it never dereferences or frees what they point to. Whoever owns the target
/// must remove the handle before the target is dropped or relocated.
pub trait Handle: Copy {
    fn same_handle(&self, other: &Self) -> bool;
}

/// Pointer identity: two references are the same handle only if they point at the same object.
impl<T: ?Sized> Handle for &T {
    #[inline]
    fn same_handle(&self, other: &Self) -> bool {
        std::ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Handle for NonNull<T> {
    #[inline]
    fn same_handle(&self, other: &Self) -> bool {
        self == other
    }
}

impl Handle for ObjectId {
    #[inline]
    fn same_handle(&self, other: &Self) -> bool {
        self == other
    }
}

impl Handle for () {
    #[inline]
    fn same_handle(&self, _other: &Self) -> bool {
        true
    }
}

macro_rules! impl_handle_id {
    ($($t:ty),*) => {$(
        impl Handle for $t {
            #[inline]
            fn same_handle(&self, other: &Self) -> bool {
                self == other
            }
        }
    )*};
}

impl_handle_id!(u8, u16, u32, u64, usize, i32, i64);
