//! GProxy core: rewrites GitHub URLs to mirror endpoints before a host
//! application sends its outbound requests.

pub mod config;
pub mod fetch_head;
pub mod host;
pub mod interceptor;
pub mod logging;
pub mod mirror;
pub mod plugin;
pub mod resolver;
pub mod settings;
