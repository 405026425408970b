pub mod bootstrap;
pub mod controller;
pub mod map;
pub mod page;
pub mod render;
