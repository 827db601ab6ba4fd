#![allow(dead_code)]

pub mod mock_models;
pub mod mock_server;
