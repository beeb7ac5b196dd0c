use crate::list::{Link, ReferenceList};
use crate::*;
use std::fmt;
use std::marker::PhantomData;
use std::pin::Pin;
use std::ptr::NonNull;

/// A nullable, non-owning pointer to a pinned [`Referenceable<T>`].
///
/// The pointer is null, or points at a live referent: dropping the referent
/// nulls it, and relocating the referent's content makes it follow.
///
/// A reference has to be pinned before it is attached. Use
/// [`reference!`](crate::reference) to pin one on the stack, or embed it as a
/// pinned field.
pub struct Reference<T> {
    link: Link,
    marker: PhantomData<*const T>,
}

impl<T> Reference<T> {
    #[inline]
    pub const fn null() -> Self {
        Self {
            link: Link::new(),
            marker: PhantomData,
        }
    }

    /// Points `self` at `target`, leaving whatever it pointed at before.
    #[inline]
    pub fn attach(self: Pin<&mut Self>, target: Pin<&Referenceable<T>>) {
        unsafe { ReferenceList::attach(target.anchor(), &self.link) }
    }

    #[inline]
    pub fn attach_opt(self: Pin<&mut Self>, target: Option<Pin<&Referenceable<T>>>) {
        match target {
            Some(target) => self.attach(target),
            None => self.reset(),
        }
    }

    /// Points `self` wherever `source` points, or nowhere if it is null.
    pub fn assign(self: Pin<&mut Self>, source: &Reference<T>) {
        match source.link.anchor() {
            Some(anchor) => unsafe { ReferenceList::attach(anchor, &self.link) },
            None => self.link.detach(),
        }
    }

    #[inline]
    pub fn reset(self: Pin<&mut Self>) {
        self.link.detach();
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.link.anchor().is_none()
    }

    /// Address of the referenced value, or null.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.get().map_or(std::ptr::null(), |p| p.as_ptr().cast_const())
    }

    #[inline]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.link.anchor().map(|anchor| unsafe {
            NonNull::new_unchecked(Referenceable::<T>::value_ptr(anchor).cast_mut())
        })
    }

    #[inline]
    pub fn try_get(&self) -> Result<NonNull<T>> {
        self.get().ok_or(Error::NullReference)
    }

    /// Borrows the referenced value.
    ///
    /// # Safety
    ///
    /// The referent must outlive the returned borrow and must not be mutated
    /// or relocated while it is alive.
    #[inline]
    pub unsafe fn value(&self) -> Option<&T> {
        self.get().map(|p| unsafe { p.as_ref() })
    }

    /// Borrows the referenced value without a null check.
    ///
    /// # Safety
    ///
    /// `self` must not be null, and the contract of [`Reference::value`]
    /// applies.
    #[inline]
    pub unsafe fn value_unchecked(&self) -> &T {
        debug_assert!(!self.is_null(), "dereferenced a null Reference");
        unsafe { &*self.as_ptr() }
    }

    #[inline]
    pub fn points_to(&self, target: &Referenceable<T>) -> bool {
        std::ptr::eq(self.as_ptr(), target.get())
    }
}

impl<T> Default for Reference<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for Reference<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.link.anchor() == other.link.anchor()
    }
}

impl<T> Eq for Reference<T> {}

impl<T> fmt::Debug for Reference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Reference").field(&self.as_ptr()).finish()
    }
}
