//! RVM Bundler Cloud Native Buildpack
//!
//! Installs a pinned Bundler, RubyGems and optionally Puma into a cached
//! `rvm-bundler` layer of an RVM managed Ruby, runs `bundle install` into
//! it, and reuses the layer while the Ruby version and the Gemfile stay
//! unchanged.

pub mod build;
pub mod bundler;
pub mod cache;
pub mod cli;
pub mod cnb;
pub mod config;
pub mod detect;
pub mod error;
pub mod exec;
pub mod layer;
pub mod parse;
pub mod puma;
pub mod ruby;

#[cfg(test)]
mod testing;

pub use error::{BundlerError, BundlerResult};
