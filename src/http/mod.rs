//! HTTP protocol layer module
//!
//! Response builders and content-type inference, decoupled from the
//! handlers that use them.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_file_response, build_passthrough_response, build_see_other_response,
};
