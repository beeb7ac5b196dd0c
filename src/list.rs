//! Untyped plumbing shared by every `Referenceable<T>` and `Reference<T>`.
//!
//! A `ReferenceList` is the head of an intrusive, doubly linked list whose
//! nodes are the `Link`s embedded in references. Nothing here allocates.
//!
//! Every node stores the address of the list it belongs to (its "anchor").
//! The anchor is derived from the enclosing referent, so the typed layer can
//! cast it back to the referent.

use crate::utility::trace;
use std::cell::Cell;
use std::marker::PhantomPinned;
use std::ptr::NonNull;

type LinkPtr = Option<NonNull<Link>>;

pub(crate) struct ReferenceList {
    head: Cell<LinkPtr>,
    _pin: PhantomPinned,
}

impl ReferenceList {
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: Cell::new(None),
            _pin: PhantomPinned,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.get().is_none()
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.get();
        while let Some(node) = cursor {
            count += 1;
            cursor = unsafe { node.as_ref() }.next.get();
        }
        count
    }

    /// Links `link` at the front of the list behind `anchor`.
    ///
    /// A link that is already attached elsewhere is detached first.
    /// Attaching a link to the list it already belongs to does nothing.
    ///
    /// # Safety
    ///
    /// `anchor` must point at a live, pinned `ReferenceList` and `link` must
    /// be pinned. Both must stay in place until they are dropped, which the
    /// `Drop` impls of the two types turn into a detach or an invalidation.
    pub unsafe fn attach(anchor: NonNull<ReferenceList>, link: &Link) {
        if link.anchor.get() == Some(anchor) {
            return;
        }
        link.detach();
        let list = unsafe { anchor.as_ref() };
        let node = NonNull::from(link);
        let head = list.head.get();
        link.anchor.set(Some(anchor));
        link.prev.set(None);
        link.next.set(head);
        if let Some(head) = head {
            unsafe { head.as_ref() }.prev.set(Some(node));
        }
        list.head.set(Some(node));
    }

    /// Nulls and unlinks every attached link. Returns how many there were.
    pub fn invalidate(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.head.take();
        while let Some(node) = cursor {
            let link = unsafe { node.as_ref() };
            cursor = link.next.take();
            link.prev.set(None);
            link.anchor.set(None);
            count += 1;
        }
        if count > 0 {
            trace!("backref: nulled {count} references");
        }
        count
    }

    /// Moves every link of `source` to the front of the list behind
    /// `anchor`, rewriting each link's anchor. `source` is left empty.
    /// Returns how many links moved.
    ///
    /// # Safety
    ///
    /// Same contract as [`ReferenceList::attach`]. `source` must not be the
    /// list behind `anchor`.
    pub unsafe fn adopt(anchor: NonNull<ReferenceList>, source: &ReferenceList) -> usize {
        let list = unsafe { anchor.as_ref() };
        debug_assert!(!std::ptr::eq(list, source));
        let first = source.head.take();
        let mut count = 0;
        let mut tail = None;
        let mut cursor = first;
        while let Some(node) = cursor {
            let link = unsafe { node.as_ref() };
            link.anchor.set(Some(anchor));
            tail = Some(node);
            cursor = link.next.get();
            count += 1;
        }
        if let Some(tail) = tail {
            let old_head = list.head.get();
            unsafe { tail.as_ref() }.next.set(old_head);
            if let Some(old_head) = old_head {
                unsafe { old_head.as_ref() }.prev.set(Some(tail));
            }
            list.head.set(first);
            trace!("backref: relocated {count} references");
        }
        count
    }
}

impl Drop for ReferenceList {
    fn drop(&mut self) {
        self.invalidate();
    }
}

pub(crate) struct Link {
    anchor: Cell<Option<NonNull<ReferenceList>>>,
    prev: Cell<LinkPtr>,
    next: Cell<LinkPtr>,
    _pin: PhantomPinned,
}

impl Link {
    #[inline]
    pub const fn new() -> Self {
        Self {
            anchor: Cell::new(None),
            prev: Cell::new(None),
            next: Cell::new(None),
            _pin: PhantomPinned,
        }
    }

    #[inline]
    pub fn anchor(&self) -> Option<NonNull<ReferenceList>> {
        self.anchor.get()
    }

    pub fn detach(&self) {
        let Some(anchor) = self.anchor.take() else {
            return;
        };
        let prev = self.prev.take();
        let next = self.next.take();
        match prev {
            Some(prev) => unsafe { prev.as_ref() }.next.set(next),
            None => unsafe { anchor.as_ref() }.head.set(next),
        }
        if let Some(next) = next {
            unsafe { next.as_ref() }.prev.set(prev);
        }
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::pin;

    fn anchor_of(list: &ReferenceList) -> NonNull<ReferenceList> {
        NonNull::from(list)
    }

    #[test]
    fn attach_prepends() {
        let list = pin!(ReferenceList::new());
        let a = pin!(Link::new());
        let b = pin!(Link::new());
        unsafe {
            ReferenceList::attach(anchor_of(&list), &a);
            ReferenceList::attach(anchor_of(&list), &b);
        }
        assert_eq!(list.len(), 2);
        assert_eq!(list.head.get(), Some(NonNull::from(&*b)));
        assert_eq!(b.next.get(), Some(NonNull::from(&*a)));
        assert_eq!(a.prev.get(), Some(NonNull::from(&*b)));
    }

    #[test]
    fn attach_twice_is_noop() {
        let list = pin!(ReferenceList::new());
        let a = pin!(Link::new());
        unsafe {
            ReferenceList::attach(anchor_of(&list), &a);
            ReferenceList::attach(anchor_of(&list), &a);
        }
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn detach_middle_head_and_tail() {
        let list = pin!(ReferenceList::new());
        let a = pin!(Link::new());
        let b = pin!(Link::new());
        let c = pin!(Link::new());
        unsafe {
            ReferenceList::attach(anchor_of(&list), &a);
            ReferenceList::attach(anchor_of(&list), &b);
            ReferenceList::attach(anchor_of(&list), &c);
        }
        b.detach();
        assert_eq!(list.len(), 2);
        assert_eq!(c.next.get(), Some(NonNull::from(&*a)));
        assert_eq!(a.prev.get(), Some(NonNull::from(&*c)));
        c.detach();
        assert_eq!(list.head.get(), Some(NonNull::from(&*a)));
        assert!(a.prev.get().is_none());
        a.detach();
        assert!(list.is_empty());
        assert!(a.anchor().is_none());
    }

    #[test]
    fn invalidate_clears_every_link() {
        let list = pin!(ReferenceList::new());
        let a = pin!(Link::new());
        let b = pin!(Link::new());
        unsafe {
            ReferenceList::attach(anchor_of(&list), &a);
            ReferenceList::attach(anchor_of(&list), &b);
        }
        assert_eq!(list.invalidate(), 2);
        assert!(list.is_empty());
        for link in [&*a, &*b] {
            assert!(link.anchor().is_none());
            assert!(link.prev.get().is_none());
            assert!(link.next.get().is_none());
        }
        // A detached link can be detached again.
        a.detach();
    }

    #[test]
    fn adopt_rewrites_anchors_and_splices() {
        let from = pin!(ReferenceList::new());
        let to = pin!(ReferenceList::new());
        let a = pin!(Link::new());
        let b = pin!(Link::new());
        let c = pin!(Link::new());
        unsafe {
            ReferenceList::attach(anchor_of(&from), &a);
            ReferenceList::attach(anchor_of(&from), &b);
            ReferenceList::attach(anchor_of(&to), &c);
            assert_eq!(ReferenceList::adopt(anchor_of(&to), &from), 2);
        }
        assert!(from.is_empty());
        assert_eq!(to.len(), 3);
        for link in [&*a, &*b, &*c] {
            assert_eq!(link.anchor(), Some(anchor_of(&to)));
        }
        assert_eq!(c.prev.get(), Some(NonNull::from(&*a)));
    }

    #[test]
    fn adopt_empty() {
        let from = pin!(ReferenceList::new());
        let to = pin!(ReferenceList::new());
        assert_eq!(unsafe { ReferenceList::adopt(anchor_of(&to), &from) }, 0);
        assert!(to.is_empty());
    }
}
