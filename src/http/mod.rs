//! HTTP listener setup.
//!
//! Plain HTTP only: the server sits behind the cluster network and is meant to
//! be probed directly by the kubelet.

mod server;

pub use server::{bind, serve, start_server, ServerError};
