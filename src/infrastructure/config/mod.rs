//! User configuration

mod profile;

pub use profile::{
    config_path, load_client_profile, load_profiles, resolve_profile, ClientProfile,
    ConfigWarning, ProfileConfig, DEFAULT_PROFILE, HOST_ENV_VAR, TOKEN_ENV_VAR,
};
