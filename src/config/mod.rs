mod loader;

pub use loader::{BuildConfig, Config, ReportConfig};
