// Adapters layer: concrete implementations for external systems (http, storage, cache, map, worker).

pub mod cache;
pub mod helper;
pub mod http;
pub mod map;
pub mod storage;
pub mod worker;
