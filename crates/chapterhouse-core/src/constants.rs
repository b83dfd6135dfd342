/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const MEMBERS_ROUTE_COMPONENT: &str = "members";
pub const MEMBERS_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", MEMBERS_ROUTE_COMPONENT);

pub const WOTD_ROUTE_COMPONENT: &str = "wotd";
pub const WOTD_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", WOTD_ROUTE_COMPONENT);

/// Page size used when a listing request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound applied to any requested page size.
pub const MAX_PAGE_SIZE: u32 = 100;
