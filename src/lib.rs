mod compiler;
mod consts;
mod descriptor;
mod directories;
mod error;
mod format;
mod logging;
mod network;
mod settings;

pub use compiler::{
    check_sources, find_requirement, CompilerSettings, InvalidRequirement, OptimizerSettings,
    PragmaMismatch, SolidityRequirement,
};
pub use consts::{DEFAULT_DEFINITION_PATH, ENV_PREFIX, NETWORK_ID_WILDCARD};
pub use descriptor::ConfigurationDescriptor;
pub use directories::DirectoryLayout;
pub use error::Error;
pub use format::{DefinitionFormat, UnknownFormat};
pub use logging::init_logs;
pub use network::{InvalidNetworkId, NetworkId, NetworkProfile, Port, PortOutOfRange};
pub use settings::{DefinitionSettings, Settings, TracingFormat, TracingSettings};
