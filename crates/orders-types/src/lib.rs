//! orders-types: wire types shared by the orders API client and its ports

pub mod domain;
pub mod ports;
