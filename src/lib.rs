pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod output;
pub mod purl;
pub mod suggest;

pub use config::{Config, NormalizeConfig};
pub use error::Error;
pub use model::{PackageIdentity, VulnerabilityRecord, VulnerabilityResult};
pub use normalize::{
    dealias, dedup, generate_aliases, generate_variations, AliasIndex, AliasSets, DealiasTable,
    Ecosystem, PackageAliasTable, PurlAliasTable,
};
