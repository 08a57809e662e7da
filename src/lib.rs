//! Flashbounce library - staggered worker launcher and bouncing flash windows

pub mod assets;
pub mod audio;
pub mod canvas;
pub mod cli;
pub mod controller;
pub mod error;
pub mod host;
pub mod params;
pub mod rendering;
pub mod text;
pub mod worker;
