//! Fixed method + path pairs of the remote API.

pub const REGISTRATION: &str = "/registration";
pub const LOGIN: &str = "/login";
pub const PROFILE: &str = "/profile";
pub const PROFILE_UPDATE: &str = "/profile/update";
pub const PROFILE_IMAGE: &str = "/profile/image";
pub const BALANCE: &str = "/balance";
pub const SERVICES: &str = "/services";
pub const BANNER: &str = "/banner";
pub const TOPUP: &str = "/topup";
pub const TRANSACTION: &str = "/transaction";
pub const TRANSACTION_HISTORY: &str = "/transaction/history";

/// Multipart field name the image upload endpoint reads.
pub const PROFILE_IMAGE_FIELD: &str = "file";
