//! Logging macros
//!
//! Forward to `defmt` on hardware builds and to `tracing` on host builds.
//! With neither feature the arguments are still evaluated by reference so
//! call sites compile identically, and nothing is emitted.
//!
//! Format strings must stay within the syntax both backends accept: plain
//! `{}` placeholders, arguments implementing both `Display` and
//! `defmt::Format`.

#![allow(unused_macros)]

macro_rules! panel_log {
    ($level:ident, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($fmt $(, $arg)*);
        #[cfg(all(feature = "tracing", not(feature = "defmt")))]
        ::tracing::$level!($fmt $(, $arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            let _ = ($(&$arg,)*);
        }
    }};
}

macro_rules! panel_trace {
    ($($t:tt)*) => { panel_log!(trace, $($t)*) };
}

macro_rules! panel_debug {
    ($($t:tt)*) => { panel_log!(debug, $($t)*) };
}

macro_rules! panel_info {
    ($($t:tt)*) => { panel_log!(info, $($t)*) };
}

macro_rules! panel_warn {
    ($($t:tt)*) => { panel_log!(warn, $($t)*) };
}

macro_rules! panel_error {
    ($($t:tt)*) => { panel_log!(error, $($t)*) };
}
