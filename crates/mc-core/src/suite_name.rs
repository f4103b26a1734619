//! Strongly-typed suite name wrapper.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Name of a check suite as declared under `suites:` in `migcheck.yml`.
    ///
    /// Keeps suite keys from being confused with table, constraint, or file
    /// names, all of which are plain strings elsewhere in the config.
    pub struct SuiteName;
}
