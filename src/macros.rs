/// Move-constructs a pinned referent on the stack.
///
/// `relocate!(let b = a.as_mut());` binds `b: Pin<&mut Referenceable<T>>`
/// holding `a`'s value, and every reference that pointed at `a` now points
/// at `b`. `a` is left holding `T::default()` with no references.
///
/// ```
/// use backref::{reference, relocate, Referenceable};
/// use std::pin::pin;
///
/// let mut a = pin!(Referenceable::new(String::from("OK")));
/// reference!(let r = a.as_ref());
/// relocate!(let b = a.as_mut());
/// assert!(r.points_to(&b));
/// assert_eq!(b.get(), "OK");
/// assert_eq!(a.get(), "");
/// ```
#[macro_export]
macro_rules! relocate {
    (let $name:ident = $source:expr) => {
        let source: ::core::pin::Pin<&mut $crate::Referenceable<_>> = $source;
        let mut $name = ::core::pin::pin!($crate::Referenceable::default());
        $crate::Referenceable::take_from(::core::pin::Pin::as_mut(&mut $name), source);
    };
}

/// Pins a [`Reference`](crate::Reference) on the stack and attaches it.
///
/// - `reference!(let r = target);` attaches to `target:
///   Pin<&Referenceable<T>>`.
/// - `reference!(let r2 = copy r1);` points wherever `r1` points.
///
/// Either form binds `r: Pin<&mut Reference<T>>`.
///
/// ```
/// use backref::{reference, Referenceable};
/// use std::pin::pin;
///
/// let a = pin!(Referenceable::new(1));
/// reference!(let r1 = a.as_ref());
/// reference!(let r2 = copy r1);
/// assert_eq!(*r1, *r2);
/// assert_eq!(a.reference_count(), 2);
/// ```
#[macro_export]
macro_rules! reference {
    (let $name:ident = copy $source:expr) => {
        let mut $name = ::core::pin::pin!($crate::Reference::null());
        $crate::Reference::assign(::core::pin::Pin::as_mut(&mut $name), &$source);
    };
    (let $name:ident = $target:expr) => {
        let mut $name = ::core::pin::pin!($crate::Reference::null());
        $crate::Reference::attach(::core::pin::Pin::as_mut(&mut $name), $target);
    };
}
