//! Core data types for package identities and vulnerability results.
//!
//! - [`PackageIdentity`] - A package as seen in a dependency manifest
//! - [`VulnerabilityResult`] - A vulnerability hit returned by the database layer
//! - [`VulnerabilityRecord`] - Read access the dealiaser and deduplicator need
//!
//! # Example
//!
//! ```
//! use depalias::PackageIdentity;
//!
//! let package = PackageIdentity::new("spring-core")
//!     .with_vendor("org.springframework")
//!     .with_purl("pkg:maven/org.springframework/spring-core@5.3.0");
//!
//! assert_eq!(package.full_name(), "org.springframework:spring-core");
//! ```

mod package;
mod vulnerability;

pub use package::*;
pub use vulnerability::*;
