pub mod cargo_env {
    pub const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");
}

pub mod engine {
    /// First major version of the engine that reports suite/spec lifecycle events.
    pub const MIN_LIFECYCLE_MAJOR_VERSION: u64 = 2;
}

pub mod settings {
    pub const ENV_PREFIX: &str = "SUITE_REPORT";
}
