//! Extension identity and the plugin contract.
//!
//! Types here name plugin kinds and their registry keys, define the
//! `Candidate` trait third-party plugins implement, and provide
//! `PluginDescriptor` for plugins described purely by data. Callers register
//! validated plugins through `ExtensionRegistry`.

pub mod contract;
pub mod descriptor;
pub mod identity;
pub mod registry;

pub use contract::{
    Candidate, FIT_OPERATION, InspectError, PARALLEL_OPERATION, PREDICT_OPERATION,
    RENDER_OPERATION, explain_operation,
};
pub use descriptor::PluginDescriptor;
pub use identity::{
    BLACKBOX_EXTENSION_KEY, DATA_EXTENSION_KEY, ExplainerType, ExplanationName, ExtensionKey,
    GLASSBOX_EXTENSION_KEY, GREYBOX_EXTENSION_KEY, PERF_EXTENSION_KEY, PROVIDER_EXTENSION_KEY,
    PluginKind,
};
pub use registry::{ExtensionRegistry, Plugin};
