//! Library surface of the SDIF merge CLI: logging setup shared between the
//! binary and its tests.

pub mod logging;
