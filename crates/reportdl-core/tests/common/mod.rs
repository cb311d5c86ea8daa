#![allow(dead_code)]

pub mod pdf;
pub mod pdf_server;
