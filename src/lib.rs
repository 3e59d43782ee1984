//! # SNP Bridge
//!
//! A small web application joining a user's 23andMe genotype calls with
//! variants served by a GA4GH server such as BRCA Exchange.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Regions, SNPs, variants, genotypes and the
//!   call/variant join
//! - **Application Layer** ([`application`]) - OAuth session handling and
//!   report assembly
//! - **Infrastructure Layer** ([`infrastructure`]) - 23andMe and GA4GH HTTP
//!   clients, SNP data file parsing
//! - **API Layer** ([`api`]) - JSON endpoints and DTOs
//! - **Web Layer** ([`web`]) - HTML pages
//!
//! ## Flow
//!
//! 1. `GET /` renders a link to the 23andMe authorization page.
//! 2. 23andMe redirects to `GET /app/?code=...&state=...`.
//! 3. The code is exchanged for a token, genotypes and the account are
//!    fetched, variants are searched in the configured region.
//! 4. Calls whose SNP position equals a variant start are reported as
//!    matches, as HTML or JSON.
//!
//! ## Quick Start
//!
//! ```bash
//! export TTAM_CLIENT_ID="..."
//! export TTAM_CLIENT_SECRET="..."
//! cargo run -- --snp-data data/snps.data
//! ```
//!
//! ## Configuration
//!
//! Flags and environment variables are described in [`config::Cli`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for integration
/// tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, ReportQuery, ReportService};
    pub use crate::domain::entities::{GenomicRegion, SnpCatalog, Variant};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, SiteSettings};
}
