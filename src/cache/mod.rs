//! Bundler layer caching
//!
//! Gems installed into the layer are reused across builds while the Ruby
//! version and the `Gemfile` / `Gemfile.lock` contents stay the same.
//!
//! | Step | Module | Result |
//! |------|--------|--------|
//! | Fingerprint | [`fingerprint`] | SHA-256 over the manifests |
//! | Decide | [`decision`] | [`InstallVerdict`] |
//! | Apply | [`lifecycle`] | [`ReconcileOutcome`], refreshed metadata |

pub mod decision;
pub mod fingerprint;
pub mod lifecycle;

pub use decision::{evaluate, InstallVerdict};
pub use fingerprint::{ChecksumCalculator, Sha256Calculator};
pub use lifecycle::{reconcile, LayerActions, ReconcileOutcome};
