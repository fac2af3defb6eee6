#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_extern_crates)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![allow(clippy::module_name_repetitions)]

//! Safe, path-based retrieval of nested values from heterogeneous containers.
//!
//! A subject is a [`Value`]: a tree mixing keyed maps, arrays, and
//! caller-defined containers (the [`IndexAccess`] and [`Record`] capability
//! traits). A path is a dotted expression such as `server.listen.port`, or a
//! pre-split list of segments. The [`reader`] functions walk the subject and
//! either hand back the value at the path or fall back to a caller-supplied
//! default, optionally coercing to a requested type on the way out.
//!
//! ```
//! use deepread::{get_integer, get_string, has, value};
//!
//! let config = value!({
//!     "server": {"listen": {"port": 8080}, "name": null},
//!     "debug": true,
//! });
//!
//! assert_eq!(get_integer(&config, "server.listen.port", 80)?, 8080);
//! assert_eq!(get_string(&config, "server.proxy", "none")?, "none");
//!
//! // A stored null is present; absence and null are distinct.
//! assert!(has(&config, "server.name")?);
//! # Ok::<(), deepread::ReadError>(())
//! ```
//!
//! Lookups never mutate the subject and resolution is a pure function of its
//! arguments. An absent value or a value of the wrong shape is not an error;
//! it produces the default. [`ReadError`] is reserved for misuse of the API
//! itself: an unreadable root subject, a malformed path argument, or a
//! default that fails the accessor's type test.

pub mod path;
pub mod reader;
pub mod value;

pub use path::{parse_path, OwnedPath, Path, PathError};
pub use reader::{
    get, get_array, get_boolean, get_float, get_integer, get_string, has, is_readable, ReadError,
};
pub use value::{IndexAccess, KeyString, ObjectMap, Record, Value};
