//! Logging shims.
//!
//! Every log site in the crate goes through these macros so the backend is a
//! build-time choice: `defmt` when that feature is on, otherwise the `log`
//! facade when that feature is on, otherwise nothing. Arguments are still
//! evaluated by reference in the silent build so call sites never trip
//! unused-variable lints.
//!
//! Format strings must stay within the common subset of both backends
//! (plain `{}` placeholders).

#![allow(unused_macros)]

macro_rules! trace {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($fmt $(, $arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::trace!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($fmt $(, $arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! info {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($fmt $(, $arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($fmt $(, $arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}

macro_rules! error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($fmt $(, $arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::error!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        {
            $( let _ = &$arg; )*
        }
    }};
}
