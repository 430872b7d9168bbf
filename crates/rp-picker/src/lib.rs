//! # rp-picker — Slot-machine style name picker
//!
//! Draws unique winners from a list of names and spins one visual reel per
//! winner. The crate owns the selection and orchestration logic; rendering is
//! delegated to a host through the [`ReelSurface`] trait.
//!
//! ## Architecture
//!
//! ```text
//! SlotPicker
//!     │
//!     ├── PickerConfig (reel count, filler length, removal policy, timing)
//!     ├── RandomSource (injected, seedable)
//!     └── ReelAnimator × N
//!           │
//!           ├── ReelContent (shuffled filler ending in the winner)
//!           ├── TransitionSpec (offset + blur keyframes)
//!           └── ReelSurface (host display: DOM, memory, ...)
//!                 │
//!                 v
//!           TransitionDone ──join_all──> SpinReport
//! ```
//!
//! ## Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rp_picker::{MemorySurface, PickerConfig, PickerHooks, SlotPicker};
//!
//! let config = PickerConfig::new("#reel").with_slots(2);
//! let mut picker = SlotPicker::new(
//!     config,
//!     PickerHooks::default(),
//!     StdRng::seed_from_u64(7),
//!     |_| Some(MemorySurface::new()),
//! )
//! .unwrap();
//!
//! picker.set_names(vec!["Alice".into(), "Bob".into(), "Carol".into()]);
//! let spun = futures_util::FutureExt::now_or_never(picker.spin());
//! assert_eq!(spun, Some(true));
//! assert_eq!(picker.names().len(), 1);
//! ```

pub mod animator;
pub mod config;
pub mod picker;
pub mod rng;
pub mod selector;
pub mod strip;
pub mod surface;
pub mod timing;

pub use animator::*;
pub use config::*;
pub use picker::*;
pub use rng::*;
pub use selector::*;
pub use strip::*;
pub use surface::*;
pub use timing::*;
