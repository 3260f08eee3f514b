//! Core system components: hardware resource allocation and the shared
//! diagnostic snapshot.
pub mod resources;
pub mod snapshot;
