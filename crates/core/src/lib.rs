//! Domain logic shared by the vitalrec server and client.
//!
//! Nothing in here touches the database or the network: request
//! validation, scorer invocation over a child process, and the helpers for
//! reading positional recommendation tuples.

pub mod dsld;
pub mod error;
pub mod recommendation;
pub mod scorer;
pub mod scripting;
pub mod types;
