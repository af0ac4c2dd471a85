//! Infrastructure layer - data gateways, services and process setup

pub mod logging;
pub mod matches;
pub mod storage;
pub mod team;
