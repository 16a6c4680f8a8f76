// SPDX-License-Identifier: MPL-2.0
//! `photarium` is a desktop client for self-hosted photo libraries built
//! with the Iced GUI framework.
//!
//! Screens fetch data from the remote REST API and render interactive views:
//! photo grids with bulk selection, a full-screen viewer, batched uploads,
//! albums, friends, and sharing.

#![doc(html_root_url = "https://docs.rs/photarium/0.2.0")]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod media;
pub mod selection;
pub mod thumbnail_cache;
pub mod ui;
pub mod upload;
pub mod viewer_navigation;
