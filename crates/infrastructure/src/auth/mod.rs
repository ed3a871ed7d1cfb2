//! OAuth redirect handling.

mod loopback_listener;

pub use loopback_listener::LoopbackCallbackListener;
