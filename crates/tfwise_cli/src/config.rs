//! Default locations and generation settings.

/// Default template directory, relative to the working directory.
pub const DEFAULT_TEMPLATE_DIR: &str = "sample_tf";

/// File name of the persisted question catalog inside the template dir.
pub const QUESTIONS_FILE: &str = tfwise_intake::QUESTIONS_FILE;

/// File name of the generated variables file inside the template dir.
pub const GENERATED_TFVARS_FILE: &str = tfwise_generate::GENERATED_TFVARS_FILE;

/// Default model identifier for both generation calls.
pub const DEFAULT_MODEL: &str = tfwise_llm::DEFAULT_MODEL;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = tfwise_llm::DEFAULT_TEMPERATURE;
