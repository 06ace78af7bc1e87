pub const PROFILE_TABLE_NAME: &'static str = "profile";
