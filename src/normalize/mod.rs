//! Package identity normalisation.
//!
//! Three steps, run in this order by a scan:
//!
//! 1. [`generate_variations`] expands each scanned package into the
//!    vendor/name combinations advisories might file it under. An
//!    [`AliasIndex`] aggregates them for the database lookup.
//! 2. [`dealias`] maps the identities reported by matched results back
//!    onto the identities the user scanned.
//! 3. [`dedup`] removes excluded, mismatched and repeated results.
//!
//! Everything here is synchronous and works on borrowed, read-only tables.

mod dealias;
mod dedup;
mod ecosystem;
mod index;
mod variations;

pub use dealias::{dealias, DealiasTable, PackageAliasTable, PurlAliasTable};
pub use dedup::dedup;
pub use ecosystem::Ecosystem;
pub use index::AliasIndex;
pub use variations::{generate_aliases, generate_variations, AliasSets, COMMON_SUFFIXES};
