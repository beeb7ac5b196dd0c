macro_rules! trace {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($arg)+);
        #[cfg(not(feature = "tracing"))]
        log::trace!($($arg)+);
    };
}

pub(crate) use trace;
