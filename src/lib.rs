//! Client-side interactivity for the portfolio site: scroll-triggered
//! reveals, animated counters and skill bars, the mobile menu, project-grid
//! filtering, the carousel, smooth scrolling, and the theme toggle.
//!
//! The behavior logic is target-independent and lives in the plain modules
//! below; `frontend` is the wasm layer that samples the document and applies
//! the decisions.

pub mod animate;
pub mod carousel;
pub mod env;
pub mod filter;
pub mod form;
pub mod menu;
pub mod scroll;
pub mod state;
pub mod theme;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
