use crate::list::ReferenceList;
use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::pin::Pin;
use std::ptr::NonNull;

/// A value that [`Reference`](crate::Reference)s can point at.
///
/// While pinned, every reference attached to it is nulled when it is dropped,
/// and follows its content when the content is relocated with
/// [`take_from`](Self::take_from), [`replace_from`](Self::replace_from) or
/// [`relocate!`](crate::relocate).
///
/// An unpinned `Referenceable<T>` cannot have references, so it may be moved
/// around like any other value.
#[repr(C)]
pub struct Referenceable<T> {
    // Must stay the first field: its address is the referent's address.
    references: ReferenceList,
    // Accessed only through `UnsafeCell::get`; references keep raw addresses
    // into it across `value_mut`.
    value: UnsafeCell<T>,
}

impl<T> Referenceable<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            references: ReferenceList::new(),
            value: UnsafeCell::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        unsafe { &*self.value.get() }
    }

    #[inline]
    pub fn value_mut(self: Pin<&mut Self>) -> &mut T {
        unsafe { &mut *self.into_ref().get_ref().value.get() }
    }

    /// Unwraps a value that was never pinned.
    #[inline]
    pub fn into_inner(self) -> T {
        let Self { value, .. } = self;
        value.into_inner()
    }

    /// Returns how many references currently point at `self`.
    #[inline]
    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    #[inline]
    pub fn is_referenced(&self) -> bool {
        !self.references.is_empty()
    }

    /// Nulls every reference that points at `self`. The value is untouched
    /// and `self` can be referenced again afterwards.
    #[inline]
    pub fn invalidate_references(self: Pin<&mut Self>) {
        self.references.invalidate();
    }

    /// Move-assignment.
    ///
    /// References to `self` are nulled and its old value is dropped.
    /// `source`'s value moves into `self`, `source` is left holding
    /// `T::default()`, and every reference to `source` now points at `self`.
    #[inline]
    pub fn take_from(self: Pin<&mut Self>, source: Pin<&mut Self>)
    where
        T: Default,
    {
        self.replace_from(source, T::default());
    }

    /// Move-assignment that leaves `vacated` in `source` and hands back the
    /// previous value of `self` instead of dropping it.
    ///
    /// References to `self` are nulled, references to `source` are
    /// redirected to `self`.
    pub fn replace_from(mut self: Pin<&mut Self>, mut source: Pin<&mut Self>, vacated: T) -> T {
        if std::ptr::eq(&*self, &*source) {
            return vacated;
        }
        self.references.invalidate();
        let value = std::mem::replace(source.as_mut().value_mut(), vacated);
        let previous = std::mem::replace(self.as_mut().value_mut(), value);
        unsafe {
            ReferenceList::adopt(self.as_ref().anchor(), &source.references);
        }
        previous
    }

    /// Copies the value into a fresh referent. References are not copied.
    #[inline]
    pub fn duplicate(&self) -> Self
    where
        T: Clone,
    {
        Self::new(self.get().clone())
    }

    /// Address of the list head, derived from the whole referent so that the
    /// typed layer may read the value through it.
    #[inline]
    pub(crate) fn anchor(self: Pin<&Self>) -> NonNull<ReferenceList> {
        NonNull::from(self.get_ref()).cast()
    }

    #[inline]
    pub(crate) fn value_ptr(anchor: NonNull<ReferenceList>) -> *const T {
        let this = anchor.cast::<Self>().as_ptr();
        unsafe { UnsafeCell::raw_get(&raw const (*this).value).cast_const() }
    }
}

impl<T: Default> Default for Referenceable<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Referenceable<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Deref for Referenceable<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.get()
    }
}

// `&mut Referenceable<T>` is only reachable while unpinned, and an unpinned
// referent has no references.
impl<T> DerefMut for Referenceable<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for Referenceable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Referenceable")
            .field("value", self.get())
            .field("references", &self.references.len())
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Referenceable<T> {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.get().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Referenceable<T> {
    #[inline]
    fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::new)
    }
}
