#![allow(dead_code)]

pub mod editor;
pub mod manual_search;
