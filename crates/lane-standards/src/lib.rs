#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loaders;
pub mod paths;
pub mod settings;
pub mod vocabulary;

pub use crate::error::StandardsError;
pub use crate::loaders::{
    load_default_country_headers, load_default_lane_id_headers, load_default_oracle_prompt,
    load_default_vocabulary, load_header_names, load_oracle_prompt,
};
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root};
pub use crate::settings::{
    ClassifierSettings, MODEL_ENV_VAR, OracleSettings, ResolutionSettings, SETTINGS_FILE, Settings,
};
pub use crate::vocabulary::{ReferenceVocabulary, load_vocabulary};
