//! Local credential persistence
//!
//! Values are obfuscated, not encrypted. Treat the storage file as sensitive.

pub mod model;
pub mod obfuscation;
pub mod storage;
pub mod store;

pub use model::{AppCredentials, AwsCredentials, Credentials, OpenAiCredentials, mask_secret};
pub use obfuscation::{deobfuscate, obfuscate};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{
    AWS_ACCESS_KEY_ID, AWS_REGION, AWS_SECRET_ACCESS_KEY, CREDENTIAL_PREFIX, CSRF_KEY,
    CredentialStore, DEFAULT_TENANT, OPENAI_API_KEY, TENANT_KEY,
};
