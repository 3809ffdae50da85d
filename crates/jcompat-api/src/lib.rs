//! Semantic queries over a Java API snapshot.
//!
//! [`Api`] wraps one [`jcompat_model::ApiSnapshot`] and answers the questions compatibility
//! checking needs: reference resolution (library, then classpath, then a bundled JDK subset),
//! erasure and signatures, generic subtyping, assignability, inherited members and overriding,
//! and export visibility. Every answer is memoized per `Api`.

#![forbid(unsafe_code)]

mod api;
mod assign;
mod erasure;
mod hierarchy;
pub mod jdk;
mod properties;
mod resolve;
mod subtyping;

pub use api::{Api, Scope};
pub use assign::{boxed, unboxed, widens};
pub use jdk::minimal_jdk;
pub use resolve::{Origin, Resolver, TypeProvider};
