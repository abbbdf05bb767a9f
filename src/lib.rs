//! smellhunt - a terminal trainer for spotting bad code.
//!
//! The quiz loop: a remote model generates an intentionally flawed code
//! sample for a topic you pick, you annotate the smells inline, and the
//! model grades your annotations. Three examples per round, one point per
//! critique it calls correct.
//!
//! - **Form**: one full-screen terminal surface (ratatui) with a masked
//!   credential field, a topic field, an editable example pane, and a
//!   read-only feedback pane
//! - **Runner**: one background request at a time, no retry, no timeout
//! - **Scoring**: a deliberately naive free-text sniff, isolated in `quiz`
//!
//! # Quick Start
//!
//! ```ignore
//! use smellhunt::config::Config;
//!
//! let config = Config::load(None)?;
//! smellhunt::tui::run(&config).await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod prompts;
pub mod quiz;
pub mod runner;
pub mod telemetry;
pub mod tui;
