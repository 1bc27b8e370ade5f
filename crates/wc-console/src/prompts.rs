use crate::capabilities::{InputRule, PromptRequest};

pub const CONTRACT_ADDRESS_LEN: usize = 40;
pub const PRIVATE_KEY_LEN: usize = 64;

pub const CHANGE_CONTRACT: PromptRequest = PromptRequest::text(
    "Change Contract",
    "Paste your contract address here:",
    InputRule::Hex { len: CONTRACT_ADDRESS_LEN },
    "Cannot handle invalid contract address",
);

pub const IMPORT_ACCOUNT_KEY: PromptRequest = PromptRequest::text(
    "Import Account",
    "Paste your private key string here:",
    InputRule::Hex { len: PRIVATE_KEY_LEN },
    "Cannot import invalid private key",
);
pub const IMPORT_ACCOUNT_LABEL: PromptRequest =
    PromptRequest::text("Import Account", "Account Label:", InputRule::NonBlank, "invalid label");
pub const IMPORT_ACCOUNT_PASSWORD: PromptRequest =
    PromptRequest::password("Import Account", "Account Password");

pub const CREATE_ACCOUNT_LABEL: PromptRequest =
    PromptRequest::text("Create Account", "Account Label:", InputRule::NonBlank, "invalid label");
pub const CREATE_ACCOUNT_PASSWORD: PromptRequest =
    PromptRequest::password("Create Account", "Account Password");

pub const REMOVE_ACCOUNT_PASSWORD: PromptRequest =
    PromptRequest::password("Remove Default Account", "Account Password");
pub const CHANGE_ACCOUNT_PASSWORD: PromptRequest =
    PromptRequest::password("Change Default Account", "Account Password");

pub const CREATE_IDENTITY_LABEL: PromptRequest =
    PromptRequest::text("Create Identity", "Identity Label:", InputRule::NonBlank, "invalid label");
pub const CREATE_IDENTITY_PASSWORD: PromptRequest =
    PromptRequest::password("Create Identity", "Identity Password");

pub const IMPORT_IDENTITY_KEY: PromptRequest = PromptRequest::text(
    "Import Identity",
    "Paste your private key string here:",
    InputRule::Hex { len: PRIVATE_KEY_LEN },
    "Cannot import invalid private key",
);
pub const IMPORT_IDENTITY_LABEL: PromptRequest =
    PromptRequest::text("Import Identity", "Identity Label:", InputRule::NonBlank, "invalid label");
pub const IMPORT_IDENTITY_PASSWORD: PromptRequest =
    PromptRequest::password("Import Identity", "Identity Password");

pub const REMOVE_IDENTITY_PASSWORD: PromptRequest =
    PromptRequest::password("Remove Default Identity", "Identity Password");
pub const CHANGE_IDENTITY_PASSWORD: PromptRequest =
    PromptRequest::password("Change Default Identity", "Identity Password");
