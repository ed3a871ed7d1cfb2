//! Adapters implementing the application ports.

mod reqwest_transport;
mod system_browser;
mod system_clock;

pub use reqwest_transport::ReqwestTransport;
pub use system_browser::SystemBrowser;
pub use system_clock::SystemClock;
