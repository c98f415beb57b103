#![allow(dead_code)]

pub mod records;
