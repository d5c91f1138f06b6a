//! Content-similarity engine behind the knowledge map viewer.
//!
//! `knowledge` turns saved articles into keyword sets, pairwise similarities,
//! corpus-wide interests and a radial graph layout. `store` talks to the
//! article backend that supplies the input snapshot.

pub mod knowledge;
pub mod store;
